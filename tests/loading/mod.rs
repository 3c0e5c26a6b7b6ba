mod credentials_tests;
mod env_file_tests;
