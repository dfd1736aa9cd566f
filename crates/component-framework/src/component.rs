//! The [`Component`] contract.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::host::Activation;
use crate::view::View;

/// `T`'s type name without module path or generic arguments.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Trait that every view-producing unit implements to be driven by a
/// [`ComponentHost`](crate::host::ComponentHost).
///
/// # Architecture Note
/// The component never mutates its own state. The host owns the current
/// `State`, feeds events through [`Component::reduce`] and re-renders with
/// [`Component::view`] after every transition. That keeps both functions
/// testable without a runtime.
///
/// # Provided Methods (Hooks)
/// - [`Component::on_activate`]: acquire resources, start loads.
/// - [`Component::on_deactivate`]: release what `on_activate` acquired.
///
/// Both are invoked by the host only. `on_deactivate` runs exactly once for
/// every instance whose activation was attempted, even a failed one, so it must
/// tolerate resources that were never acquired (see
/// [`release_slot`](crate::timer::release_slot)).
#[async_trait]
pub trait Component: Send + Sized + 'static {
    /// The state record. Starts as `Default::default()`.
    type State: Clone + Default + Debug + Send + Sync + 'static;

    /// Events that drive state transitions (typically load results).
    type Event: Debug + Send + 'static;

    /// Error returned by the lifecycle hooks.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short name used in logs and mounted chains. Defaults to the type name
    /// without its module path.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Computes the next state. The old state is left untouched.
    fn reduce(state: &Self::State, _event: Self::Event) -> Self::State {
        state.clone()
    }

    /// Pure view function. Must accept the default state.
    fn view(&self, state: &Self::State) -> View;

    // --- Lifecycle Hooks (Async) ---

    /// Called when the instance becomes active.
    async fn on_activate(&mut self, _ctx: &mut Activation<Self>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when the instance becomes inactive.
    async fn on_deactivate(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    struct Wrapper<T>(T);

    #[test]
    fn test_short_type_name_drops_path_and_generics() {
        assert_eq!(short_type_name::<Plain>(), "Plain");
        assert_eq!(short_type_name::<Wrapper<Plain>>(), "Wrapper");
        assert_eq!(short_type_name::<u32>(), "u32");
    }
}
