// Service module exports

pub mod background;
pub mod countdown;
pub mod notification;
pub mod settings;
