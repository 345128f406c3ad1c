use uuid::Uuid;

/// Random identifier of an [`Emitter`](crate::Emitter) instance.
///
/// Only used to tell emitters apart in log records; it carries no
/// meaning otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmitterId(u128);

impl EmitterId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4().as_u128())
    }

    #[inline]
    pub fn as_u128(&self) -> u128 {
        self.0
    }
}

impl std::fmt::Display for EmitterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Uuid::from_u128(self.0).simple())
    }
}
