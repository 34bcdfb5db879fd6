mod admin_alert;

pub use admin_alert::{NewAlert, PublicAlert};
