mod error_test;
mod settings_test;
