use std::{borrow::Cow, hash::Hash, ops::Deref, sync::Arc};

use crate::Label;

/// Key under which handlers are grouped.
///
/// Any hashable, cloneable type with a [`Label`] qualifies, so besides the
/// default [`EventName`] an emitter can be keyed by a closed enum:
///
/// ```rust
/// use microevent::{Emitter, Label};
///
/// #[derive(Debug, Clone, Hash, PartialEq, Eq, Label)]
/// enum Door {
///     Opened,
///     Closed,
/// }
///
/// struct Sensor;
/// let emitter = Emitter::<Sensor, (), Door>::new();
/// assert!(!emitter.has_listeners(&Door::Opened));
/// ```
///
/// Topics must be `Send + Sync + 'static` because they are stored in the
/// emitter's registry, which may be shared between threads.
pub trait Topic: Label + Hash + Eq + Clone + Send + Sync + 'static {}

impl<T> Topic for T where T: Label + Hash + Eq + Clone + Send + Sync + 'static {}

/// Default topic: a cheaply clonable event name.
///
/// Unlike [`Handler`](crate::Handler), names compare by content, so
/// `EventName::from("click")` built twice addresses the same handlers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventName(Arc<str>);

impl EventName {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Label for EventName {
    fn label(&self) -> Cow<'static, str> {
        Cow::Owned(self.0.to_string())
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self(name.into())
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(name.into())
    }
}

impl From<&String> for EventName {
    fn from(name: &String) -> Self {
        Self(name.as_str().into())
    }
}

impl From<Arc<str>> for EventName {
    fn from(name: Arc<str>) -> Self {
        Self(name)
    }
}

impl From<&EventName> for EventName {
    fn from(name: &EventName) -> Self {
        name.clone()
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for EventName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_event_name_equality_is_by_content() {
        let a = EventName::from("surprise");
        let b = EventName::from(String::from("surprise"));
        assert_eq!(a, b);

        let mut map = HashMap::new();
        map.insert(a, 1);
        assert_eq!(map.get(&b), Some(&1));
    }

    #[test]
    fn test_event_name_label_and_display() {
        let name = EventName::from("click");
        assert_eq!(name.label(), "click");
        assert_eq!(name.to_string(), "click");
        assert_eq!(name.as_str(), "click");
        assert_eq!(name.len(), 5);
    }

    #[test]
    fn test_topic_as_enum() {
        #[derive(Debug, PartialEq, Eq, Hash, Clone)]
        enum TestTopic {
            IoT,
            System,
        }
        impl Label for TestTopic {
            fn label(&self) -> Cow<'static, str> {
                Cow::Borrowed(match self {
                    TestTopic::IoT => "IoT",
                    TestTopic::System => "System",
                })
            }
        }

        fn assert_topic<T: Topic>(t: &T) -> Cow<'static, str> {
            t.label()
        }

        assert_eq!(assert_topic(&TestTopic::IoT), "IoT");
        assert_eq!(assert_topic(&TestTopic::System), "System");
        assert_eq!(assert_topic(&"static"), "static");
    }
}
