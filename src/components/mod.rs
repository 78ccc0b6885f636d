pub mod app;
pub mod camera_controls;
pub mod info_panel;
pub mod plot_view;
pub mod point_form;
pub mod settings_modal;
