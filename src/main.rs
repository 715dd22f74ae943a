mod api;
mod app;
mod components;
mod config;
mod controller;
mod dom;
mod draft;
mod error;
mod form;
mod pages;
mod preview;
mod submit;

use app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
