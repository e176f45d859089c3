//! Machine-readable API description (Swagger 2.0).

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::http::server::AppState;

const DEFAULT_HOST: &str = "localhost:8000";

pub async fn get_api_description(State(state): State<AppState>) -> Json<Value> {
    let url = state.config.service.url.as_str();
    let host = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url)
        .trim_end_matches('/');
    let host = if host.is_empty() { DEFAULT_HOST } else { host };
    Json(api_description(host))
}

fn token_headers() -> Value {
    json!({
        "accessToken": { "type": "string", "description": "Access Token" },
        "refreshToken": { "type": "string", "description": "Refresh Token" }
    })
}

fn error_schema() -> Value {
    json!({ "$ref": "#/definitions/api.HTTPErrorResponse" })
}

pub fn api_description(host: &str) -> Value {
    json!({
        "swagger": "2.0",
        "schemes": [],
        "info": {
            "title": "Let's Live API",
            "description": "The server API",
            "version": "0.1",
            "contact": { "name": "Nam Huynh", "email": "hthnam203@gmail.com" }
        },
        "host": host,
        "basePath": "/v1",
        "paths": {
            "/auth/login": login_path(),
            "/auth/signup": signup_path(),
            "/auth/verify": verify_path()
        },
        "definitions": definitions()
    })
}

fn login_path() -> Value {
    json!({
        "post": {
            "summary": "Log in a user",
            "description": "Authenticate user with email and password",
            "tags": ["Authentication"],
            "consumes": ["application/json"],
            "parameters": [{
                "name": "userCredentials",
                "in": "body",
                "required": true,
                "description": "User credentials",
                "schema": { "$ref": "#/definitions/api.logInForm" }
            }],
            "responses": {
                "204": { "description": "No Content", "headers": token_headers() },
                "400": { "description": "Invalid body", "schema": { "type": "string" } },
                "401": {
                    "description": "Username or password is not correct",
                    "schema": { "type": "string" }
                }
            }
        }
    })
}

fn signup_path() -> Value {
    json!({
        "post": {
            "summary": "Sign up a new user",
            "description": "Register a new user with username, email, and password\nOn success, redirect user to index page and set refresh and access token in cookie",
            "tags": ["Authentication"],
            "consumes": ["application/json"],
            "parameters": [{
                "name": "userForm",
                "in": "body",
                "required": true,
                "description": "User registration data",
                "schema": { "$ref": "#/definitions/api.signUpForm" }
            }],
            "responses": {
                "204": { "description": "No Content", "headers": token_headers() },
                "400": { "description": "Bad Request", "schema": error_schema() },
                "500": { "description": "Internal Server Error", "schema": error_schema() }
            }
        }
    })
}

fn verify_path() -> Value {
    json!({
        "get": {
            "summary": "Verify user email",
            "description": "Verifies a user's email address with the provided token",
            "tags": ["Authentication"],
            "consumes": ["application/json"],
            "parameters": [{
                "name": "token",
                "in": "query",
                "type": "string",
                "required": true,
                "description": "Email verification token"
            }],
            "responses": {
                "200": {
                    "description": "Return a Email verification complete! string",
                    "schema": { "type": "string" }
                },
                "400": {
                    "description": "Verify token expired or invalid.",
                    "schema": { "type": "string" }
                },
                "500": {
                    "description": "An error occurred while verifying the user.",
                    "schema": { "type": "string" }
                }
            }
        }
    })
}

fn password_property() -> Value {
    json!({ "type": "string", "minLength": 8, "maxLength": 72, "example": "123123123" })
}

fn definitions() -> Value {
    json!({
        "api.HTTPErrorResponse": {
            "type": "object",
            "properties": {
                "code": { "type": "integer", "example": 500 },
                "message": { "type": "string", "example": "internal server error" }
            }
        },
        "api.logInForm": {
            "type": "object",
            "required": ["email", "password"],
            "properties": {
                "email": { "type": "string", "example": "hthnam203@gmail.com" },
                "password": password_property()
            }
        },
        "api.signUpForm": {
            "type": "object",
            "required": ["email", "password", "username"],
            "properties": {
                "email": { "type": "string", "example": "hthnam203@gmail.com" },
                "password": password_property(),
                "username": {
                    "type": "string",
                    "minLength": 6,
                    "maxLength": 50,
                    "example": "sen1or"
                }
            }
        }
    })
}
