//! Declarative macros for effect construction

/// Create an `Effect::Future` from an async block
///
/// The body is wrapped in `async move`, so captured values must be owned.
///
/// # Example
///
/// ```
/// use cart_store_core::{async_effect, effect::Effect};
///
/// let effect: Effect<u32> = async_effect! {
///     Some(42)
/// };
///
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Fetched { value: i32 },
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::Fetched { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[tokio::test]
    async fn test_async_effect_moves_captures() {
        let value = 9;
        let effect = async_effect! {
            Some(TestAction::Fetched { value })
        };

        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds a future effect");
        };
        assert_eq!(fut.await, Some(TestAction::Fetched { value: 9 }));
    }
}
