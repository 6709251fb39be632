//! The fixed output column set.
//!
//! Header and row writers both read `OUTPUT_SCHEMA`; nothing else lists the columns.

/// Number of output columns.
pub const SCHEMA_LEN: usize = 69;

/// Ordered output columns.
pub const OUTPUT_SCHEMA: [&str; SCHEMA_LEN] = [
    "JDX",
    "ACCOUNT_NUMBER",
    "PropID",
    "LastRun",
    "OwnerName",
    "OwnerStreet",
    "OwnerCity",
    "OwnerState",
    "OwnerZIP",
    "PropStreet",
    "PropCity",
    "PropState",
    "PropZIP",
    "Description",
    "Exemptions",
    "Lawsuit",
    "BK",
    "Tax",
    "Fees",
    "PriorDue",
    "LastPayment",
    "LastPaymentDate",
    "LastPayer",
    "PendingPayment",
    "PendingPaymentDate",
    "ValueAss",
    "ValueLand",
    "ValueImp",
    "CurrentDue",
    "TOTAL DUE",
    "LTV",
    "law suit active",
    "FEES2",
    "TT W FEES 4 PMT",
    "RATE",
    "APR",
    "pmt",
    "best payment option",
    "Back of card repayment obligation",
    "Obligation IF you use entire term",
    "lesser obligation",
    "IF PAID BY",
    "ESTIMATED MAX PURCHASE PRICE",
    "CASH TO CUSTOMER",
    "WIGGLE ROOM",
    "FORECLOSURE",
    "tax loan amount",
    "lender name",
    "MAILER/DELTE",
    "pmt 24 mts",
    "MobileHome",
    "UNIQUE",
    CURRENT_OWNER_NAME,
    CURRENT_OWNER_STREET,
    CURRENT_OWNER_CITY,
    CURRENT_OWNER_STATE,
    CURRENT_OWNER_ZIP,
    CURRENT_PROP_ADDRESS,
    CURRENT_PROP_STREET,
    CURRENT_PROP_CITY,
    CURRENT_PROP_STATE,
    CURRENT_PROP_ZIP,
    CURRENT_TAX_DUE,
    LAST_PAYMENT_INFO,
    CURRENT_TOTAL_VALUE,
    CURRENT_LAND_VALUE,
    CURRENT_IMPROVEMENT_VALUE,
    FETCH_STATUS,
    FETCH_DATE,
];

// Columns written by the pipeline itself.
pub const ACCOUNT_NUMBER: &str = "ACCOUNT_NUMBER";
pub const CURRENT_OWNER_NAME: &str = "CURRENT_OWNER_NAME";
pub const CURRENT_OWNER_STREET: &str = "CURRENT_OWNER_STREET";
pub const CURRENT_OWNER_CITY: &str = "CURRENT_OWNER_CITY";
pub const CURRENT_OWNER_STATE: &str = "CURRENT_OWNER_STATE";
pub const CURRENT_OWNER_ZIP: &str = "CURRENT_OWNER_ZIP";
pub const CURRENT_PROP_ADDRESS: &str = "CURRENT_PROP_ADDRESS";
pub const CURRENT_PROP_STREET: &str = "CURRENT_PROP_STREET";
pub const CURRENT_PROP_CITY: &str = "CURRENT_PROP_CITY";
pub const CURRENT_PROP_STATE: &str = "CURRENT_PROP_STATE";
pub const CURRENT_PROP_ZIP: &str = "CURRENT_PROP_ZIP";
pub const CURRENT_TAX_DUE: &str = "CURRENT_TAX_DUE";
pub const LAST_PAYMENT_INFO: &str = "LAST_PAYMENT_INFO";
pub const CURRENT_TOTAL_VALUE: &str = "CURRENT_TOTAL_VALUE";
pub const CURRENT_LAND_VALUE: &str = "CURRENT_LAND_VALUE";
pub const CURRENT_IMPROVEMENT_VALUE: &str = "CURRENT_IMPROVEMENT_VALUE";
pub const FETCH_STATUS: &str = "FETCH_STATUS";
pub const FETCH_DATE: &str = "FETCH_DATE";

/// Column index of `name`, if it is part of the schema.
pub fn position(name: &str) -> Option<usize> {
    OUTPUT_SCHEMA.iter().position(|column| *column == name)
}
