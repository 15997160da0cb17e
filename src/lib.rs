//! Backend de avaliações de empresas: cadastro de empresas com logo,
//! avaliações com curtidas e a média de notas recalculada a cada escrita.

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
