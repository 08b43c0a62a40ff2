mod app;
mod components;
mod hooks;

use web_sys::Element;

const MOUNT_ID: &str = "app";

fn mount_point() -> Option<Element> {
  gloo::utils::document()
    .get_element_by_id(MOUNT_ID)
}

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  match mount_point() {
    | Some(root) => {
      tracing::info!(
        mount = MOUNT_ID,
        "starting taskdeck frontend"
      );
      yew::Renderer::<app::App>::with_root(
        root
      )
      .render();
    }
    | None => {
      tracing::error!(
        mount = MOUNT_ID,
        "mount element missing; rendering \
         into <body>"
      );
      yew::Renderer::<app::App>::new()
        .render();
    }
  }
}
