use source_files::SourceFiles;

pub trait Show {
    fn show(&self, w: &mut dyn std::fmt::Write, source_files: &SourceFiles) -> std::fmt::Result;

    fn eprintln(self: &Self, source_files: &SourceFiles) {
        let mut message = String::new();

        if self.show(&mut message, source_files).is_ok() {
            eprintln!("{}", message);
        }
    }
}
