//! Declarative rule tables, one per payload kind.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Any,
    /// Lowercase ASCII letters, digits and hyphens.
    Slug,
    Url,
}

#[derive(Debug, Clone, Copy)]
pub enum Check {
    Text {
        min: usize,
        max: Option<usize>,
        format: TextFormat,
    },
    Timestamp {
        message: &'static str,
    },
    OneOf(&'static [&'static str]),
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Optional, and an explicit `null` is accepted.
    Nullable,
    /// Filled in with the given value when absent.
    DefaultFlag(bool),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub label: &'static str,
    pub presence: Presence,
    pub check: Check,
}

#[derive(Debug, Clone, Copy)]
pub enum Invariant {
    /// `field` must not be earlier than `reference`; only evaluated when
    /// both are present in the payload.
    NotBefore {
        field: &'static str,
        reference: &'static str,
        message: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaRules {
    pub fields: &'static [FieldRule],
    /// Every field becomes optional and defaults are not applied.
    pub partial: bool,
    pub invariants: &'static [Invariant],
}

pub const STATUSES: &[&str] = &["draft", "upcoming", "past", "cancelled"];

pub const SLUG_MESSAGE: &str = "Slug must contain only lowercase letters, numbers, and hyphens";
pub const URL_MESSAGE: &str = "Invalid URL format";

const END_AFTER_START: Invariant = Invariant::NotBefore {
    field: "endDate",
    reference: "startDate",
    message: "End date must be after or equal to start date",
};

const START_DATE: FieldRule = FieldRule {
    field: "startDate",
    label: "Start date",
    presence: Presence::Required,
    check: Check::Timestamp {
        message: "Invalid start date format",
    },
};

const END_DATE: FieldRule = FieldRule {
    field: "endDate",
    label: "End date",
    presence: Presence::Required,
    check: Check::Timestamp {
        message: "Invalid end date format",
    },
};

pub const EVENT_FIELDS: &[FieldRule] = &[
    FieldRule {
        field: "title",
        label: "Title",
        presence: Presence::Required,
        check: Check::Text {
            min: 1,
            max: Some(255),
            format: TextFormat::Any,
        },
    },
    FieldRule {
        field: "slug",
        label: "Slug",
        presence: Presence::Required,
        check: Check::Text {
            min: 1,
            max: Some(255),
            format: TextFormat::Slug,
        },
    },
    FieldRule {
        field: "description",
        label: "Description",
        presence: Presence::Required,
        check: Check::Text {
            min: 1,
            max: None,
            format: TextFormat::Any,
        },
    },
    START_DATE,
    END_DATE,
    FieldRule {
        field: "status",
        label: "Status",
        presence: Presence::Required,
        check: Check::OneOf(STATUSES),
    },
    FieldRule {
        field: "location",
        label: "Location",
        presence: Presence::Nullable,
        check: Check::Text {
            min: 0,
            max: Some(255),
            format: TextFormat::Any,
        },
    },
    FieldRule {
        field: "ctaText",
        label: "CTA text",
        presence: Presence::Nullable,
        check: Check::Text {
            min: 0,
            max: Some(100),
            format: TextFormat::Any,
        },
    },
    FieldRule {
        field: "ctaUrl",
        label: "CTA URL",
        presence: Presence::Nullable,
        check: Check::Text {
            min: 0,
            max: Some(500),
            format: TextFormat::Url,
        },
    },
    FieldRule {
        field: "isFeatured",
        label: "Featured flag",
        presence: Presence::DefaultFlag(false),
        check: Check::Flag,
    },
];

pub const LOGIN: SchemaRules = SchemaRules {
    fields: &[
        FieldRule {
            field: "username",
            label: "Username",
            presence: Presence::Required,
            check: Check::Text {
                min: 1,
                max: None,
                format: TextFormat::Any,
            },
        },
        FieldRule {
            field: "password",
            label: "Password",
            presence: Presence::Required,
            check: Check::Text {
                min: 1,
                max: None,
                format: TextFormat::Any,
            },
        },
    ],
    partial: false,
    invariants: &[],
};

pub const CREATE_EVENT: SchemaRules = SchemaRules {
    fields: EVENT_FIELDS,
    partial: false,
    invariants: &[END_AFTER_START],
};

pub const UPDATE_EVENT: SchemaRules = SchemaRules {
    fields: EVENT_FIELDS,
    partial: true,
    invariants: &[END_AFTER_START],
};

pub const UPDATE_DATES: SchemaRules = SchemaRules {
    fields: &[START_DATE, END_DATE],
    partial: false,
    invariants: &[END_AFTER_START],
};
