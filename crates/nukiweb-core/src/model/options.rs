// ── Select option tables ──
//
// Fixed value/label tables for the advanced-config selects. Plain tables
// label each value with its decimal form; mapped tables use symbolic names.

/// One selectable value and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: i64,
    pub label: &'static str,
}

const fn opt(value: i64, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

/// How an unlisted wire value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Show the raw number.
    Plain,
    /// Show `"unknown"`.
    Mapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionTable {
    pub kind: OptionKind,
    pub options: &'static [SelectOption],
}

impl OptionTable {
    const fn plain(options: &'static [SelectOption]) -> Self {
        Self {
            kind: OptionKind::Plain,
            options,
        }
    }

    const fn mapped(options: &'static [SelectOption]) -> Self {
        Self {
            kind: OptionKind::Mapped,
            options,
        }
    }

    /// Label for a wire value, falling back per [`OptionKind`].
    pub fn label_for(&self, value: i64) -> String {
        match self.options.iter().find(|o| o.value == value) {
            Some(o) => o.label.to_owned(),
            None => match self.kind {
                OptionKind::Plain => value.to_string(),
                OptionKind::Mapped => "unknown".to_owned(),
            },
        }
    }

    /// Wire value for a label, if the label is in the table.
    pub fn value_for(&self, label: &str) -> Option<i64> {
        self.options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.value)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.options.iter().map(|o| o.label).collect()
    }
}

/// Lock 'n' go timeout in seconds.
pub const LNG_TIMEOUT: OptionTable = OptionTable::plain(&[
    opt(5, "5"),
    opt(10, "10"),
    opt(15, "15"),
    opt(20, "20"),
    opt(30, "30"),
    opt(45, "45"),
    opt(60, "60"),
]);

/// Unlatch duration in seconds.
pub const UNLATCH_DURATION: OptionTable = OptionTable::plain(&[
    opt(1, "1"),
    opt(3, "3"),
    opt(5, "5"),
    opt(7, "7"),
    opt(10, "10"),
    opt(15, "15"),
    opt(20, "20"),
    opt(30, "30"),
]);

pub const BATTERY_TYPE: OptionTable =
    OptionTable::mapped(&[opt(0, "alkali"), opt(1, "accumulator"), opt(2, "lithium")]);

pub const BUTTON_PRESS_ACTION: OptionTable = OptionTable::mapped(&[
    opt(0, "no_action"),
    opt(1, "intelligent"),
    opt(2, "unlock"),
    opt(3, "lock"),
    opt(4, "unlatch"),
    opt(5, "lock_n_go"),
    opt(6, "show_status"),
]);

pub const MOTOR_SPEED: OptionTable =
    OptionTable::mapped(&[opt(0, "standard"), opt(1, "fast"), opt(2, "slow")]);
