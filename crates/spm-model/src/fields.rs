//! Catalog of standard payroll fields the backend maps headers onto.

/// A standard target field with a short description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardField {
    pub name: &'static str,
    pub description: &'static str,
}

pub const STANDARD_FIELDS: &[StandardField] = &[
    StandardField {
        name: "full_name",
        description: "Employee name",
    },
    StandardField {
        name: "currency",
        description: "Currency code or type",
    },
    StandardField {
        name: "base_salary",
        description: "Base salary amount",
    },
    StandardField {
        name: "bonus",
        description: "Bonus amount",
    },
    StandardField {
        name: "total_salary",
        description: "Combined salary",
    },
    StandardField {
        name: "tax_rate",
        description: "Tax percentage or rate",
    },
    StandardField {
        name: "location",
        description: "Location or city name",
    },
    StandardField {
        name: "country_code",
        description: "Country identifier",
    },
    StandardField {
        name: "employee_id",
        description: "Employee identifier",
    },
    StandardField {
        name: "hire_date",
        description: "Employment or hire date",
    },
    StandardField {
        name: "other",
        description: "Fields outside the standard categories",
    },
];

/// Returns true if `name` is one of [`STANDARD_FIELDS`].
pub fn is_standard_field(name: &str) -> bool {
    STANDARD_FIELDS.iter().any(|field| field.name == name)
}
