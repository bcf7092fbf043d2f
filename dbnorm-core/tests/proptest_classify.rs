use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use dbnorm_core::{classify, duplicate_key_name, message, Classification, Driver, ErrorKind};
use proptest::prelude::*;
use sqlx::error::{DatabaseError, ErrorKind as SqlxErrorKind};

#[derive(Debug)]
struct NativeError {
    code: String,
    message: String,
    constraint: Option<String>,
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for NativeError {}

impl DatabaseError for NativeError {
    fn message(&self) -> &str {
        &self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.code.as_str()))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        self.constraint.as_deref()
    }

    fn kind(&self) -> SqlxErrorKind {
        SqlxErrorKind::Other
    }
}

fn native(code: &str, message: &str, constraint: Option<&str>) -> sqlx::Error {
    sqlx::Error::Database(Box::new(NativeError {
        code: code.to_string(),
        message: message.to_string(),
        constraint: constraint.map(str::to_string),
    }))
}

fn arb_driver() -> impl Strategy<Value = Driver> {
    prop_oneof![Just(Driver::Postgres), Just(Driver::Sqlite)]
}

#[test]
fn postgres_scenarios() {
    let err = native("23505", "duplicate key value", Some("users_email_key"));
    assert_eq!(
        classify(Driver::Postgres, Some(&err)).kind(),
        Some(ErrorKind::Duplicate)
    );
    assert_eq!(
        duplicate_key_name(Driver::Postgres, &err).unwrap(),
        "users_email_key"
    );
    assert_eq!(message(Some(&err)).unwrap(), "duplicate key value");

    let err = native("40001", "could not serialize access", None);
    assert_eq!(
        classify(Driver::Postgres, Some(&err)).kind(),
        Some(ErrorKind::SerializationConflict)
    );

    let err = native("22001", "value too long", None);
    assert_eq!(
        classify(Driver::Postgres, Some(&err)).kind(),
        Some(ErrorKind::Other)
    );
}

proptest! {
    /// Property: any code missing from the driver's table classifies as Other
    #[test]
    fn prop_unmapped_codes_are_other(driver in arb_driver(), code in "[0-9A-Z]{1,5}") {
        prop_assume!(driver.kind_for_code(&code).is_none());

        let err = native(&code, "boom", None);
        let class = classify(driver, Some(&err));
        prop_assert!(matches!(class, Classification::Kind(ErrorKind::Other)));
    }

    /// Property: table entries always win, regardless of message or constraint
    #[test]
    fn prop_table_codes_map_exactly(
        driver in arb_driver(),
        idx in any::<prop::sample::Index>(),
        msg in ".*",
        constraint in proptest::option::of("[a-z_]{1,20}"),
    ) {
        let table = driver.error_codes();
        let (code, kind) = table[idx.index(table.len())];

        let err = native(code, &msg, constraint.as_deref());
        prop_assert_eq!(classify(driver, Some(&err)).kind(), Some(kind));
    }

    /// Property: message always returns the driver's text for native errors
    #[test]
    fn prop_message_passes_through(code in "[0-9]{5}", msg in ".*") {
        let err = native(&code, &msg, None);
        prop_assert_eq!(message(Some(&err)).unwrap(), msg.as_str());
    }
}
