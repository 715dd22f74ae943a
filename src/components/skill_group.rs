use leptos::prelude::*;

use crate::form::{append_block, SkillGroup};

#[component]
pub fn SkillGroupFields(
    group: SkillGroup,
    #[prop(default = 1)] initial: usize,
) -> impl IntoView {
    let (fields, set_fields) = signal((0..initial).collect::<Vec<usize>>());

    let add_skill_field = move |_| {
        set_fields.update(|keys| {
            append_block(keys);
        });
    };

    view! {
        <div class="skill-group">
            <label>{group.label()}</label>
            <div id=group.container_id() class="skill-inputs">
                <For
                    each=move || fields.get()
                    key=|key| *key
                    children=move |_| view! {
                        <input
                            type="text"
                            name=group.field_name()
                            placeholder=group.placeholder()
                            aria-label=group.placeholder()
                            class="input"
                        />
                    }
                />
            </div>
            <button type="button" class="btn btn-add" on:click=add_skill_field>
                "Add Skill"
            </button>
        </div>
    }
}
