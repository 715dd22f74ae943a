use leptos::prelude::*;

use crate::form::{append_block, FieldSpec, SectionKind, ENTRY_CLASS};

/// A repeatable section: its container of `.entry` blocks and an add button.
///
/// Blocks are keyed, so adding one leaves the existing inputs (and whatever
/// the user typed into them) untouched.
#[component]
pub fn EntrySection(
    kind: SectionKind,
    /// Number of empty blocks rendered up front
    #[prop(default = 1)]
    initial: usize,
) -> impl IntoView {
    let (entries, set_entries) = signal((0..initial).collect::<Vec<usize>>());

    let add_entry = move |_| {
        set_entries.update(|keys| {
            append_block(keys);
        });
    };

    view! {
        <fieldset class="form-section">
            <legend>{kind.title()}</legend>
            <div id=kind.container_id() class="entries">
                <For
                    each=move || entries.get()
                    key=|key| *key
                    children=move |_| view! { <EntryBlock kind=kind /> }
                />
            </div>
            <button type="button" class="btn btn-add" on:click=add_entry>
                {kind.add_label()}
            </button>
        </fieldset>
    }
}

#[component]
fn EntryBlock(kind: SectionKind) -> impl IntoView {
    view! {
        <div class=ENTRY_CLASS>
            {kind.fields().iter().map(field_control).collect::<Vec<_>>()}
        </div>
    }
}

fn field_control(field: &'static FieldSpec) -> AnyView {
    if field.multiline {
        view! {
            <textarea
                name=field.name
                placeholder=field.placeholder
                aria-label=field.placeholder
                class="input"
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                name=field.name
                placeholder=field.placeholder
                aria-label=field.placeholder
                class="input"
            />
        }
        .into_any()
    }
}
