pub mod chat_log;
pub mod menu;
pub mod quiz_form;
pub mod quiz_sheet;
pub mod suggestion_row;
