// Parser module for extracting import statements from Python sources

pub mod ast;
mod python;

pub use ast::*;
pub use python::PythonParser;
