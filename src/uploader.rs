use std::rc::Rc;

use crate::config::{substitute, UploaderConfig};
use crate::control::{ControlState, FormControl, ValiditySink};
use crate::error::{ConfigError, HostError};
use crate::size::{format_file_size, DEFAULT_DECIMALS};

mod accept;
mod action;
pub mod host;

pub use accept::AcceptFilter;
pub use action::{Action, Outcome};

/// What the uploader needs to know about a file.
pub trait FileLike {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    fn mime_type(&self) -> String;
}

/// Plain file description, used where no browser file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

impl FileLike for FileInfo {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }
}

/// The form the uploader submits through.
pub trait FormHost: ValiditySink {
    type File: FileLike;

    /// Replace the submission value with one entry per file under `name`.
    fn set_form_value(&self, name: &str, files: &[Rc<Self::File>]) -> Result<(), HostError>;
}

/// File-list form control: validates the selection against the configured
/// constraints and mirrors it into the host form.
pub struct Uploader<H: FormHost> {
    config: UploaderConfig,
    accept: Option<AcceptFilter>,
    state: ControlState,
    value: Vec<Rc<H::File>>,
    dragover: bool,
    host: H,
}

impl<H: FormHost> Uploader<H> {
    pub fn new(config: UploaderConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let accept = config.accept.as_deref().and_then(AcceptFilter::parse);

        Ok(Self {
            config,
            accept,
            state: ControlState::default(),
            value: Vec::new(),
            dragover: false,
            host,
        })
    }

    /// Control with the default constraints, which are always valid.
    pub fn with_defaults(name: impl Into<String>, host: H) -> Self {
        Self {
            config: UploaderConfig::new(name),
            accept: None,
            state: ControlState::default(),
            value: Vec::new(),
            dragover: false,
            host,
        }
    }

    /// Swap in a new configuration and re-run validation against it.
    pub fn reconfigure(&mut self, config: UploaderConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.accept = config.accept.as_deref().and_then(AcceptFilter::parse);
        self.config = config;
        self.check_validity();
        Ok(())
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn value(&self) -> &[Rc<H::File>] {
        &self.value
    }

    pub fn is_dragover(&self) -> bool {
        self.dragover
    }

    /// Label click or blur of the native input.
    pub fn touch(&mut self) {
        self.mark_as_touched();
    }

    /// Files picked through the native chooser.
    pub fn select(&mut self, files: Vec<Rc<H::File>>) -> &[Rc<H::File>] {
        self.mark_as_dirty();
        self.set_value(files);
        &self.value
    }

    /// Files dropped on the drop zone; anything the accept filter rejects is
    /// left out silently.
    pub fn drop_files(&mut self, files: Vec<Rc<H::File>>) -> &[Rc<H::File>] {
        self.dragover = false;
        self.mark_as_dirty();

        let files = match &self.accept {
            Some(filter) => {
                let before = files.len();
                let kept: Vec<_> = files.into_iter().filter(|f| filter.matches(&**f)).collect();
                if kept.len() < before {
                    log::debug!("accept filter dropped {} file(s)", before - kept.len());
                }
                kept
            }
            None => files,
        };

        self.set_value(files);
        &self.value
    }

    /// Remove one file, matched by identity.
    pub fn remove(&mut self, file: &Rc<H::File>) -> &[Rc<H::File>] {
        self.mark_as_dirty();

        let files = self
            .value
            .iter()
            .filter(|f| !Rc::ptr_eq(f, file))
            .cloned()
            .collect();

        self.set_value(files);
        &self.value
    }

    pub fn drag_over(&mut self) {
        self.dragover = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragover = false;
    }

    /// First declarative rule the current value breaks.
    fn first_violation(&self) -> Option<String> {
        let config = &self.config;
        let messages = &config.messages;
        let count = self.value.len();

        if config.required && count == 0 {
            return Some(messages.required.clone());
        }

        if let Some(min) = config.min {
            if count < min {
                return Some(substitute(&messages.min, "{min}", &min.to_string()));
            }
        }

        if let Some(max) = config.max {
            if count > max {
                return Some(substitute(&messages.max, "{max}", &max.to_string()));
            }
        }

        if self.value.iter().any(|f| f.size() > config.max_file_size) {
            let limit = format_file_size(config.max_file_size, DEFAULT_DECIMALS);
            return Some(substitute(&messages.max_file_size, "{maxFileSize}", &limit));
        }

        None
    }

    fn publish(&self) {
        if self.config.name.is_empty() {
            log::warn!("uploader has no name, {} file(s) not submitted", self.value.len());
        }
        if let Err(err) = self.host.set_form_value(&self.config.name, &self.value) {
            log::warn!("failed to publish uploader value: {err}");
        }
    }
}

impl<H: FormHost> FormControl for Uploader<H> {
    type Value = Vec<Rc<H::File>>;

    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    fn validity_sink(&self) -> &dyn ValiditySink {
        &self.host
    }

    fn reset(&mut self) {
        self.set_value(Vec::new());
        self.dragover = false;
        self.state.clear_interaction();
    }

    fn check_validity(&mut self) -> bool {
        let message = match self.state.custom_error() {
            Some(custom) => Some(custom.to_string()),
            None => self.first_violation(),
        };

        if let Some(message) = &message {
            log::debug!("uploader `{}` invalid: {message}", self.config.name);
        }

        let valid = message.is_none();
        self.set_validation_message(message);
        valid
    }

    /// The value is published even when invalid; the validity flag set on the
    /// host is what keeps the form from submitting.
    fn set_value(&mut self, value: Self::Value) {
        self.value = value;
        self.check_validity();
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockHost {
        validity: RefCell<Vec<Option<String>>>,
        published: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl ValiditySink for MockHost {
        fn set_validity(&self, message: Option<&str>) {
            self.validity.borrow_mut().push(message.map(str::to_string));
        }
    }

    impl FormHost for MockHost {
        type File = FileInfo;

        fn set_form_value(&self, name: &str, files: &[Rc<FileInfo>]) -> Result<(), HostError> {
            let names = files.iter().map(|f| f.name.clone()).collect();
            self.published.borrow_mut().push((name.to_string(), names));
            Ok(())
        }
    }

    fn file(name: &str, size: u64, mime: &str) -> Rc<FileInfo> {
        Rc::new(FileInfo::new(name, size, mime))
    }

    fn uploader(config: UploaderConfig) -> Uploader<MockHost> {
        Uploader::new(config, MockHost::default()).unwrap()
    }

    fn names(files: &[Rc<FileInfo>]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = UploaderConfig {
            min: Some(2),
            max: Some(1),
            ..UploaderConfig::new("files")
        };
        assert!(Uploader::new(config, MockHost::default()).is_err());
    }

    #[test]
    fn with_defaults_uses_default_constraints() {
        let mut control = Uploader::with_defaults("files", MockHost::default());
        assert_eq!(control.config(), &UploaderConfig::new("files"));
        assert!(control.check_validity());
    }

    #[test]
    fn required_comes_first() {
        let mut control = uploader(UploaderConfig {
            required: true,
            min: Some(1),
            ..UploaderConfig::new("files")
        });

        assert!(!control.check_validity());
        assert_eq!(control.validation_message(), Some("This field is required"));
    }

    #[test]
    fn min_and_max_fill_their_tokens() {
        let mut control = uploader(UploaderConfig {
            min: Some(2),
            max: Some(3),
            ..UploaderConfig::new("files")
        });

        control.select(vec![file("a", 1, "")]);
        assert_eq!(
            control.validation_message(),
            Some("The minimum number of files allowed is 2")
        );

        control.select((0..4).map(|i| file(&i.to_string(), 1, "")).collect());
        assert_eq!(
            control.validation_message(),
            Some("The maximum number of files allowed is 3")
        );

        control.select(vec![file("a", 1, ""), file("b", 1, "")]);
        assert!(control.check_validity());
        assert_eq!(control.validation_message(), None);
    }

    #[test]
    fn oversized_file_reports_readable_limit() {
        let mut control = uploader(UploaderConfig {
            max: None,
            max_file_size: 1536,
            ..UploaderConfig::new("files")
        });

        control.select(vec![file("small", 1536, ""), file("big", 1537, "")]);
        assert!(!control.report_validity());
        assert_eq!(control.validation_message(), Some("Each file must be at most 1.50 KB"));
    }

    #[test]
    fn count_rules_win_over_size() {
        let mut control = uploader(UploaderConfig {
            max: Some(1),
            max_file_size: 10,
            ..UploaderConfig::new("files")
        });

        control.select(vec![file("a", 100, ""), file("b", 100, "")]);
        assert_eq!(
            control.validation_message(),
            Some("The maximum number of files allowed is 1")
        );
    }

    #[test]
    fn custom_templates_are_used() {
        let mut config = UploaderConfig::new("files");
        config.required = true;
        config.messages.required = "Pick something".to_string();
        let mut control = uploader(config);

        control.check_validity();
        assert_eq!(control.validation_message(), Some("Pick something"));
        assert_eq!(
            control.host().validity.borrow().last(),
            Some(&Some("Pick something".to_string()))
        );
    }

    #[test]
    fn drop_applies_accept_filter() {
        let mut control = uploader(UploaderConfig {
            max: None,
            accept: Some("image/png,.jpg".to_string()),
            ..UploaderConfig::new("files")
        });

        control.drag_over();
        assert!(control.is_dragover());

        let kept = control.drop_files(vec![
            file("a.png", 1, "image/png"),
            file("b.jpg", 1, "image/jpeg"),
            file("c.gif", 1, "image/gif"),
        ]);
        assert_eq!(names(kept), ["a.png", "b.jpg"]);
        assert!(!control.is_dragover());
        assert!(control.dirty());
    }

    #[test]
    fn drop_without_accept_keeps_everything() {
        let mut control = uploader(UploaderConfig {
            max: None,
            ..UploaderConfig::new("files")
        });

        let kept = control.drop_files(vec![file("a.png", 1, "image/png"), file("c.gif", 1, "image/gif")]);
        assert_eq!(names(kept), ["a.png", "c.gif"]);
    }

    #[test]
    fn select_does_not_filter() {
        let mut control = uploader(UploaderConfig {
            max: None,
            accept: Some(".png".to_string()),
            ..UploaderConfig::new("files")
        });

        let kept = control.select(vec![file("c.gif", 1, "image/gif")]);
        assert_eq!(names(kept), ["c.gif"]);
    }

    #[test]
    fn remove_by_identity_keeps_order() {
        let mut control = uploader(UploaderConfig {
            max: Some(2),
            ..UploaderConfig::new("files")
        });

        let a = file("same", 1, "");
        let b = file("same", 1, "");
        let c = file("other", 1, "");
        control.select(vec![a.clone(), b.clone(), c.clone()]);
        assert!(control.validation_message().is_some());

        let left = control.remove(&b);
        assert_eq!(left.len(), 2);
        assert!(Rc::ptr_eq(&left[0], &a));
        assert!(Rc::ptr_eq(&left[1], &c));
        assert_eq!(control.validation_message(), None);

        let published = control.host().published.borrow();
        assert_eq!(published.last().unwrap().1, ["same", "other"]);
    }

    #[test]
    fn every_change_is_published_under_name() {
        let mut control = uploader(UploaderConfig {
            max: Some(1),
            ..UploaderConfig::new("files")
        });

        control.select(vec![file("a", 1, ""), file("b", 1, "")]);
        assert!(control.validation_message().is_some());

        let published = control.host().published.borrow();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "files");
        assert_eq!(published[0].1, ["a", "b"]);
    }

    #[test]
    fn validity_runs_before_publication() {
        let mut control = uploader(UploaderConfig::new("files"));
        control.select(vec![file("a", 1, "")]);

        assert_eq!(control.host().validity.borrow().len(), 1);
        assert_eq!(control.host().published.borrow().len(), 1);
    }

    #[test]
    fn reset_clears_value_and_interaction() {
        let mut control = uploader(UploaderConfig {
            required: true,
            ..UploaderConfig::new("files")
        });

        control.touch();
        control.select(vec![file("a", 1, "")]);
        let first = control.value()[0].clone();
        control.remove(&first);
        assert_eq!(control.displayed_message(), Some("This field is required"));

        control.reset();
        assert!(control.value().is_empty());
        assert!(!control.touched());
        assert!(!control.dirty());
        assert_eq!(control.displayed_message(), None);
        assert_eq!(control.host().published.borrow().last().unwrap().1.len(), 0);
    }

    #[test]
    fn custom_error_outranks_rules() {
        let mut control = uploader(UploaderConfig::new("files"));

        control.set_custom_validity(Some("server rejected the upload"));
        control.select(vec![file("a", 1, "")]);
        assert!(!control.report_validity());
        assert_eq!(control.validation_message(), Some("server rejected the upload"));

        control.set_custom_validity(None);
        assert_eq!(control.validation_message(), None);
        assert!(control.report_validity());
    }

    #[test]
    fn reconfigure_revalidates() {
        let mut control = uploader(UploaderConfig::new("files"));
        assert!(control.check_validity());

        control
            .reconfigure(UploaderConfig {
                required: true,
                ..UploaderConfig::new("files")
            })
            .unwrap();
        assert_eq!(control.validation_message(), Some("This field is required"));

        let bad = UploaderConfig {
            max_file_size: 0,
            ..UploaderConfig::new("files")
        };
        assert!(control.reconfigure(bad).is_err());
        assert!(control.config().required);
    }
}
