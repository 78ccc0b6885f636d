use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::model::PointRow;
use crate::state::RowField;

#[derive(Properties, PartialEq, Clone)]
pub struct PointFormProps {
    pub rows: Vec<PointRow>,
    pub on_edit: Callback<(usize, RowField, String)>,
    pub on_add: Callback<()>,
    pub on_remove: Callback<()>,
    pub on_plot: Callback<()>,
}

#[function_component]
pub fn PointForm(props: &PointFormProps) -> Html {
    let submit_cb = {
        let cb = props.on_plot.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit(());
        })
    };
    let add_cb = {
        let cb = props.on_add.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let remove_cb = {
        let cb = props.on_remove.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let field_input = |index: usize, field: RowField| {
        let cb = props.on_edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit((index, field, input.value()));
        })
    };

    html! {
        <form id="coord-form" onsubmit={submit_cb} style="display:flex; flex-direction:column; gap:8px;">
            <div id="point-list" style="display:flex; flex-direction:column; gap:6px;">
                { for props.rows.iter().enumerate().map(|(i, row)| html! {
                    <div class="point-input" style="display:flex; gap:6px;">
                        <input type="text" name="name" placeholder="Name" style="width:70px;"
                            value={row.name.clone()} oninput={field_input(i, RowField::Name)} />
                        <input type="number" name="x" placeholder="X" step="0.001" style="width:110px;"
                            value={row.x.clone()} oninput={field_input(i, RowField::X)} />
                        <input type="number" name="y" placeholder="Y" step="0.001" style="width:110px;"
                            value={row.y.clone()} oninput={field_input(i, RowField::Y)} />
                    </div>
                }) }
            </div>
            <div style="display:flex; gap:6px;">
                <button type="button" id="add-point-btn" onclick={add_cb}>{"Add point"}</button>
                <button type="button" id="remove-point-btn" onclick={remove_cb} disabled={props.rows.len() <= 1}>{"Remove point"}</button>
                <button type="submit">{"Plot"}</button>
            </div>
        </form>
    }
}
