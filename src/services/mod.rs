//! 服务层模块

mod form_controller;

pub use form_controller::FormController;
