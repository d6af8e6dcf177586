mod common;
mod composition_tests;
mod rendering_tests;
