use taskdeck_core::task::{
  ShareEntry,
  SharePermission
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct ShareModalProps {
  pub is_open:     bool,
  pub shared_with: Vec<ShareEntry>,
  pub error:       Option<String>,
  pub on_share:
    Callback<(String, SharePermission)>,
  pub on_permission_change:
    Callback<(Uuid, SharePermission)>,
  pub on_remove:   Callback<Uuid>,
  pub on_close:    Callback<()>
}

#[function_component(ShareModal)]
pub fn share_modal(
  props: &ShareModalProps
) -> Html {
  let email = use_state(String::new);
  let permission =
    use_state(SharePermission::default);

  if !props.is_open {
    return html! {};
  }

  let on_email_input = {
    let email = email.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        email.set(input.value());
      }
    )
  };

  let on_permission_select = {
    let permission = permission.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      if let Some(next) =
        SharePermission::parse(&select.value())
      {
        permission.set(next);
      }
    })
  };

  let on_share_click = {
    let email = email.clone();
    let permission = permission.clone();
    let on_share = props.on_share.clone();
    Callback::from(move |_| {
      on_share.emit((
        (*email).clone(),
        *permission
      ));
    })
  };

  let on_close_click = {
    let on_close = props.on_close.clone();
    Callback::from(move |_| {
      on_close.emit(());
    })
  };

  html! {
      <div class="modal-backdrop">
          <div class="modal share-modal">
              <div class="header">{ "Share Task" }</div>
              <div class="content">
                  {
                      if let Some(err) = props.error.clone() {
                          html! { <div class="form-error">{ err }</div> }
                      } else {
                          html! {}
                      }
                  }
                  <div class="field share-add">
                      <input
                          type="email"
                          placeholder="name@example.com"
                          value={(*email).clone()}
                          oninput={on_email_input}
                      />
                      <select onchange={on_permission_select}>
                          <option value="view" selected={*permission == SharePermission::View}>{ "Can view" }</option>
                          <option value="edit" selected={*permission == SharePermission::Edit}>{ "Can edit" }</option>
                      </select>
                      <button type="button" class="btn primary" onclick={on_share_click}>{ "Share" }</button>
                  </div>
                  <div class="share-list">
                      {
                          for props.shared_with.iter().map(|entry| {
                              let user_id = entry.user_id;
                              let on_remove = props.on_remove.clone();
                              let on_permission_change = props.on_permission_change.clone();
                              html! {
                                  <div class="share-row">
                                      <span>{ &entry.email }</span>
                                      <select onchange={Callback::from(move |e: web_sys::Event| {
                                          let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
                                          if let Some(next) = SharePermission::parse(&select.value()) {
                                              on_permission_change.emit((user_id, next));
                                          }
                                      })}>
                                          <option value="view" selected={entry.permission == SharePermission::View}>{ "Can view" }</option>
                                          <option value="edit" selected={entry.permission == SharePermission::Edit}>{ "Can edit" }</option>
                                      </select>
                                      <button type="button" class="btn ghost" onclick={move |_| on_remove.emit(user_id)}>{ "Remove" }</button>
                                  </div>
                              }
                          })
                      }
                  </div>
              </div>
              <div class="footer">
                  <button type="button" class="btn" onclick={on_close_click}>{ "Done" }</button>
              </div>
          </div>
      </div>
  }
}
