/// Builds a [`Value`](crate::Value) inside a realm with JavaScript-like
/// literal syntax.
///
/// Arrays and objects are created through the given [`Realm`](crate::Realm),
/// so they carry its prototypes. Anything else goes through `Value::from`.
///
/// ```rust
/// use dumper::{value, Realm};
///
/// let realm = Realm::new();
/// let user = value!(&realm, {
///     "name": "virk",
///     "tags": ["admin", null],
///     "deleted": undefined
/// });
/// assert!(user.as_object().is_some());
/// ```
#[macro_export]
macro_rules! value {
    ($realm:expr, undefined) => {
        $crate::Value::Undefined
    };

    ($realm:expr, null) => {
        $crate::Value::Null
    };

    ($realm:expr, true) => {
        $crate::Value::Bool(true)
    };

    ($realm:expr, false) => {
        $crate::Value::Bool(false)
    };

    ($realm:expr, []) => {
        $crate::Value::Object($crate::Realm::array::<_, $crate::Value>($realm, []))
    };

    ($realm:expr, [ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Object($crate::Realm::array(
            $realm,
            [$($crate::value!($realm, $elem)),*],
        ))
    };

    ($realm:expr, {}) => {
        $crate::Value::Object($crate::Realm::object($realm))
    };

    ($realm:expr, { $($key:literal : $value:tt),* $(,)? }) => {{
        let object = $crate::Realm::object($realm);
        $(
            object.insert($key, $crate::value!($realm, $value));
        )*
        $crate::Value::Object(object)
    }};

    ($realm:expr, $other:expr) => {
        $crate::Value::from($other)
    };
}
