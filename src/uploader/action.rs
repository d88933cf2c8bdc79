use std::rc::Rc;

use super::{FormHost, Uploader};
use crate::control::FormControl;

/// Everything that can happen to an uploader, from the user or the page.
pub enum Action<F> {
    Touch,
    Select(Vec<Rc<F>>),
    Drop(Vec<Rc<F>>),
    Remove(Rc<F>),
    DragOver,
    DragLeave,
    /// First check after mount; runs the rules without marking interaction.
    InitialCheck,
    Reset,
    SetCustomValidity(Option<String>),
    ReportValidity,
}

/// What the view layer has to do after an action.
pub struct Outcome<F> {
    pub render: bool,
    /// New value to announce with a `change` event.
    pub changed: Option<Vec<Rc<F>>>,
    /// Answer to `ReportValidity`.
    pub valid: Option<bool>,
}

impl<F> Outcome<F> {
    fn render(render: bool) -> Self {
        Self {
            render,
            changed: None,
            valid: None,
        }
    }

    fn changed(value: &[Rc<F>]) -> Self {
        Self {
            render: true,
            changed: Some(value.to_vec()),
            valid: None,
        }
    }
}

impl<H: FormHost> Uploader<H> {
    pub fn apply(&mut self, action: Action<H::File>) -> Outcome<H::File> {
        let disabled = self.config().disabled;

        match action {
            Action::Touch => {
                self.touch();
                Outcome::render(true)
            }
            Action::Select(files) if !disabled => Outcome::changed(self.select(files)),
            Action::Drop(files) if !disabled => Outcome::changed(self.drop_files(files)),
            Action::Remove(file) if !disabled => Outcome::changed(self.remove(&file)),
            Action::Drop(_) => {
                let was_dragover = self.is_dragover();
                self.drag_leave();
                Outcome::render(was_dragover)
            }
            Action::Select(_) | Action::Remove(_) => Outcome::render(false),
            Action::DragOver => {
                let changed = !self.is_dragover();
                self.drag_over();
                Outcome::render(changed)
            }
            Action::DragLeave => {
                let changed = self.is_dragover();
                self.drag_leave();
                Outcome::render(changed)
            }
            Action::InitialCheck => {
                self.check_validity();
                Outcome::render(true)
            }
            Action::Reset => {
                self.reset();
                Outcome::render(true)
            }
            Action::SetCustomValidity(message) => {
                self.set_custom_validity(message.as_deref());
                Outcome::render(true)
            }
            Action::ReportValidity => Outcome {
                valid: Some(self.report_validity()),
                ..Outcome::render(true)
            },
        }
    }
}
