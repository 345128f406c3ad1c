use std::borrow::Cow;

pub trait Label {
    /// Returns a human-readable label for this item.
    /// This is used for logging and error messages.
    fn label(&self) -> Cow<'static, str>;
}

impl Label for &'static str {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(*self)
    }
}

impl Label for String {
    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(self.clone())
    }
}
