#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceFileKey(pub(crate) u32);

impl SourceFileKey {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("too many source files"))
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
