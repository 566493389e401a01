use leptos::prelude::mount_to_body;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(client::app::App);
}
