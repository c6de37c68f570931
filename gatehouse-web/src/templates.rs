//! Template system for server-side rendering
//!
//! This module provides templates for server-side rendering using Askama.

use askama::Template;

/// Home page template, shown to signed-in users
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub user_name: String,
}

/// Sign-in form template
#[derive(Template)]
#[template(path = "sign_in.html")]
pub struct SignInTemplate {
    pub title: String,
    pub rejected: bool,
}

impl HomeTemplate {
    pub fn new(user_name: String) -> Self {
        Self {
            title: "Gatehouse".to_string(),
            user_name,
        }
    }
}

impl SignInTemplate {
    pub fn new(rejected: bool) -> Self {
        Self {
            title: "Sign in - Gatehouse".to_string(),
            rejected,
        }
    }
}
