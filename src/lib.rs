pub mod error;

pub mod controllers {
    pub mod feed;
    pub mod health;
}

pub mod domain {
    pub mod auth;
    pub mod content;
    pub mod feed;
}

pub mod infrastructure {
    pub mod auth;
    pub mod config;
    pub mod db;
    pub mod http;
    pub mod repositories;
}
