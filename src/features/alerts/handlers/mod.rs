pub mod alert_handler;

pub use alert_handler::{
    __path_create_alert, __path_list_public_alerts, create_alert, list_public_alerts,
};
