// Módulos expostos como biblioteca para que os testes de integração em
// tests/ consigam montar os serviços com repositórios de mentira.
pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
