//! Model of the filter control bar
//!
//! Controls keep the ids the page uses (`f-dv`, `f-group`, ...), which are
//! also the keys of the persisted filter state.

pub const DOLBY_VISION: &str = "f-dv";
pub const HDR: &str = "f-hdr";
pub const RESOLUTION: &str = "f-res";
pub const MIN_RATING: &str = "f-rating";
pub const MIN_SIZE: &str = "f-minsize";
pub const MAX_SIZE: &str = "f-maxsize";
pub const CATEGORY: &str = "f-category";
pub const GROUP: &str = "f-group";
pub const SEARCH: &str = "f-search";
/// Not a filter: never highlighted, persisted or restored
pub const PAGE_LIMIT: &str = "f-pagelimit";

/// Default value of the page-limit control
pub const ALL_PAGES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Checkbox,
    Input,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Control {
    id: &'static str,
    kind: ControlKind,
    checked: bool,
    value: String,
    options: Vec<SelectOption>,
    active: bool,
}

impl Control {
    fn checkbox(id: &'static str) -> Self {
        Self {
            id,
            kind: ControlKind::Checkbox,
            checked: false,
            value: String::new(),
            options: vec![],
            active: false,
        }
    }

    fn input(id: &'static str) -> Self {
        Self {
            kind: ControlKind::Input,
            ..Self::checkbox(id)
        }
    }

    fn select(id: &'static str, options: Vec<SelectOption>) -> Self {
        let value = options.first().map(|o| o.value.clone()).unwrap_or_default();
        Self {
            kind: ControlKind::Select,
            value,
            options,
            ..Self::checkbox(id)
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn is_checkbox(&self) -> bool {
        self.kind == ControlKind::Checkbox
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Selects only accept values they have an option for; anything else clears them
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.value = match self.kind {
            ControlKind::Select if !self.has_option(&value) => String::new(),
            _ => value,
        };
    }

    /// Replace a select's options, keeping the selection only if it survives
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        if !self.has_option(&self.value) {
            self.value = self.options.first().map(|o| o.value.clone()).unwrap_or_default();
        }
    }

    fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Back to the empty/unchecked default
    pub fn reset(&mut self) {
        self.checked = false;
        self.set_value("");
    }

    fn refresh_active(&mut self) {
        self.active = match self.kind {
            ControlKind::Checkbox => self.checked,
            _ => !self.value.is_empty(),
        };
    }
}

/// The full set of named controls
#[derive(Debug, Clone)]
pub struct ControlBar {
    controls: Vec<Control>,
}

impl Default for ControlBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBar {
    pub fn new() -> Self {
        let opts = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(v, l)| SelectOption::new(*v, *l))
                .collect::<Vec<_>>()
        };

        Self {
            controls: vec![
                Control::checkbox(DOLBY_VISION),
                Control::checkbox(HDR),
                Control::select(
                    RESOLUTION,
                    opts(&[
                        ("", "All resolutions"),
                        ("2160p", "2160p"),
                        ("1080p", "1080p"),
                        ("720p", "720p"),
                    ]),
                ),
                Control::input(MIN_RATING),
                Control::input(MIN_SIZE),
                Control::input(MAX_SIZE),
                Control::select(
                    CATEGORY,
                    opts(&[
                        ("", "All"),
                        ("movies", "Movies"),
                        ("tv-shows", "TV Shows"),
                        ("tv-packs", "TV Packs"),
                    ]),
                ),
                Control::select(GROUP, opts(&[("", "All groups")])),
                Control::input(SEARCH),
                Control::select(
                    PAGE_LIMIT,
                    opts(&[
                        (ALL_PAGES, "All pages"),
                        ("5", "5 pages"),
                        ("10", "10 pages"),
                        ("20", "20 pages"),
                        ("50", "50 pages"),
                        ("100", "100 pages"),
                    ]),
                ),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    /// Value of a control, empty for unknown ids
    pub fn value(&self, id: &str) -> &str {
        self.get(id).map(Control::value).unwrap_or("")
    }

    pub fn checked(&self, id: &str) -> bool {
        self.get(id).is_some_and(Control::checked)
    }

    /// Returns false when no control has this id
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(control) => {
                control.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.get_mut(id) {
            Some(control) => {
                control.set_checked(checked);
                true
            }
            None => false,
        }
    }

    /// Every filter control back to its default, page limit back to "all"
    pub fn reset(&mut self) {
        for control in &mut self.controls {
            if control.id == PAGE_LIMIT {
                control.set_value(ALL_PAGES);
            } else {
                control.reset();
            }
        }
    }

    /// Recompute the "active" highlight of every filter control
    pub fn refresh_highlights(&mut self) {
        for control in self.controls.iter_mut().filter(|c| c.id != PAGE_LIMIT) {
            control.refresh_active();
        }
    }

    /// Ids of highlighted controls
    pub fn active_ids(&self) -> Vec<&'static str> {
        self.controls.iter().filter(|c| c.active).map(|c| c.id).collect()
    }
}
