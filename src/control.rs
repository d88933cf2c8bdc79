//! State and behaviour shared by every form-associated control.

/// Receives the control's validity so the host form can block submission.
pub trait ValiditySink {
    /// `None` clears the native error, `Some` flags the control as invalid.
    fn set_validity(&self, message: Option<&str>);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    touched: bool,
    dirty: bool,
    validation_message: Option<String>,
    custom_error: Option<String>,
}

impl ControlState {
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    pub fn custom_error(&self) -> Option<&str> {
        self.custom_error.as_deref()
    }

    /// Forget user interaction. The custom error survives, like the native one.
    pub fn clear_interaction(&mut self) {
        self.touched = false;
        self.dirty = false;
    }
}

/// A control that takes part in native form validation.
///
/// Implementors supply the constraint evaluation (`check_validity`) and the
/// value commit (`set_value`); interaction flags and validity reporting are
/// shared.
pub trait FormControl {
    type Value;

    fn state(&self) -> &ControlState;

    fn state_mut(&mut self) -> &mut ControlState;

    fn validity_sink(&self) -> &dyn ValiditySink;

    /// Restore the initial value and forget user interaction.
    fn reset(&mut self);

    /// Evaluate every constraint and record the first failure.
    fn check_validity(&mut self) -> bool;

    fn set_value(&mut self, value: Self::Value);

    /// Set when the user has focused or clicked the control.
    fn touched(&self) -> bool {
        self.state().touched()
    }

    /// Set when the user has changed the value.
    fn dirty(&self) -> bool {
        self.state().dirty()
    }

    /// Non-`None` means the control is invalid.
    fn validation_message(&self) -> Option<&str> {
        self.state().validation_message()
    }

    /// The message the UI should show: errors stay hidden until the user has
    /// interacted with the control.
    fn displayed_message(&self) -> Option<&str> {
        let state = self.state();
        if state.touched() || state.dirty() {
            state.validation_message()
        } else {
            None
        }
    }

    fn mark_as_touched(&mut self) {
        self.state_mut().touched = true;
    }

    fn mark_as_dirty(&mut self) {
        self.state_mut().dirty = true;
    }

    /// Set or clear a custom error. It takes precedence over the declarative
    /// constraints until it is cleared again.
    fn set_custom_validity(&mut self, message: Option<&str>) {
        let message = message.filter(|m| !m.is_empty()).map(str::to_string);
        self.state_mut().custom_error = message.clone();
        self.set_validation_message(message);
    }

    fn report_validity(&mut self) -> bool {
        self.check_validity()
    }

    /// Record the outcome of a validity check and forward it to the host.
    fn set_validation_message(&mut self, message: Option<String>) {
        self.validity_sink().set_validity(message.as_deref());
        self.state_mut().validation_message = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        calls: RefCell<Vec<Option<String>>>,
    }

    impl ValiditySink for RecordingSink {
        fn set_validity(&self, message: Option<&str>) {
            self.calls.borrow_mut().push(message.map(str::to_string));
        }
    }

    /// Text control that is valid when non-empty.
    #[derive(Default)]
    struct NonEmpty {
        state: ControlState,
        sink: RecordingSink,
        value: String,
    }

    impl FormControl for NonEmpty {
        type Value = String;

        fn state(&self) -> &ControlState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ControlState {
            &mut self.state
        }

        fn validity_sink(&self) -> &dyn ValiditySink {
            &self.sink
        }

        fn reset(&mut self) {
            self.set_value(String::new());
            self.state.clear_interaction();
        }

        fn check_validity(&mut self) -> bool {
            let message = match self.state.custom_error() {
                Some(custom) => Some(custom.to_string()),
                None if self.value.is_empty() => Some("empty".to_string()),
                None => None,
            };
            let valid = message.is_none();
            self.set_validation_message(message);
            valid
        }

        fn set_value(&mut self, value: String) {
            self.value = value;
            self.check_validity();
        }
    }

    #[test]
    fn flags_are_idempotent() {
        let mut control = NonEmpty::default();
        assert!(!control.touched());
        assert!(!control.dirty());

        control.mark_as_touched();
        control.mark_as_touched();
        control.mark_as_dirty();
        assert!(control.touched());
        assert!(control.dirty());
        assert!(control.sink.calls.borrow().is_empty());
    }

    #[test]
    fn custom_validity_round_trip() {
        let mut control = NonEmpty::default();
        control.set_value("ok".to_string());
        assert!(control.report_validity());

        control.set_custom_validity(Some("x"));
        assert_eq!(control.validation_message(), Some("x"));
        assert!(!control.report_validity());
        assert_eq!(control.validation_message(), Some("x"));

        control.set_custom_validity(None);
        assert_eq!(control.validation_message(), None);
        assert!(control.report_validity());

        let calls = control.sink.calls.borrow();
        assert_eq!(calls.last(), Some(&None));
        assert!(calls.contains(&Some("x".to_string())));
    }

    #[test]
    fn empty_custom_message_clears() {
        let mut control = NonEmpty::default();
        control.set_custom_validity(Some("x"));
        control.set_custom_validity(Some(""));
        assert_eq!(control.state().custom_error(), None);
        assert_eq!(control.validation_message(), None);
    }

    #[test]
    fn errors_are_hidden_until_interaction() {
        let mut control = NonEmpty::default();
        assert!(!control.check_validity());
        assert_eq!(control.validation_message(), Some("empty"));
        assert_eq!(control.displayed_message(), None);

        control.mark_as_touched();
        assert_eq!(control.displayed_message(), Some("empty"));

        control.reset();
        assert_eq!(control.displayed_message(), None);
    }
}
