pub mod automation_handler;

pub use automation_handler::{
    __path_create_automation, __path_delete_automation, __path_list_automations,
    create_automation, delete_automation, list_automations,
};
