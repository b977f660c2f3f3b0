mod details_tests;
mod fields_tests;
