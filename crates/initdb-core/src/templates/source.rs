//! Template bodies compiled into the binary
//!
//! Sources are addressed by their path under `templates/`, the same id the
//! catalog uses in its `source` fields.

/// The catalog document
pub const CATALOG: &str = include_str!("../../templates/catalog.yaml");

macro_rules! sources {
    ($($id:literal),* $(,)?) => {
        &[$(($id, include_str!(concat!("../../templates/", $id)))),*]
    };
}

static SOURCES: &[(&str, &str)] = sources![
    "common/gitignore",
    "common/README.md",
    "common/tsconfig.json",
    "common/dummy",
    "common/httpCodesAndMessages.js",
    "common/httpCodesAndMessages.ts",
    "mongo/env",
    "mongo/dbConfig.js",
    "mongo/dbConfig.ts",
    "mongo/model.js",
    "mongo/model.ts",
    "sequelize/env",
    "sequelize/dbConfig.js",
    "sequelize/dbConfig.ts",
    "sequelize/model.js",
    "sequelize/model.ts",
    "express/index.js",
    "express/index.ts",
    "express/responseHandler.js",
    "express/responseHandler.ts",
    "express/health.Controller.js",
    "express/health.Controller.ts",
    "express/health.Route.js",
    "express/health.Route.ts",
    "express/auth.Middleware.js",
    "express/auth.Middleware.ts",
    "express/controller.js",
    "express/controller.ts",
    "express/route.js",
    "express/route.ts",
    "fastify/index.js",
    "fastify/index.ts",
    "fastify/responseHandler.js",
    "fastify/responseHandler.ts",
    "fastify/health.Controller.js",
    "fastify/health.Controller.ts",
    "fastify/health.Route.js",
    "fastify/health.Route.ts",
    "fastify/auth.Middleware.js",
    "fastify/auth.Middleware.ts",
    "fastify/controller.js",
    "fastify/controller.ts",
    "fastify/route.js",
    "fastify/route.ts",
    "elysia/index.js",
    "elysia/index.ts",
    "elysia/responseHandler.js",
    "elysia/responseHandler.ts",
    "elysia/health.Controller.js",
    "elysia/health.Controller.ts",
    "elysia/health.Route.js",
    "elysia/health.Route.ts",
    "elysia/auth.Middleware.js",
    "elysia/auth.Middleware.ts",
    "elysia/controller.js",
    "elysia/controller.ts",
    "elysia/route.js",
    "elysia/route.ts",
];

/// Look up a template body by id
pub fn get(id: &str) -> Option<&'static str> {
    SOURCES
        .iter()
        .find(|(source_id, _)| *source_id == id)
        .map(|(_, body)| *body)
}

/// All known source ids
pub fn ids() -> impl Iterator<Item = &'static str> {
    SOURCES.iter().map(|(id, _)| *id)
}
