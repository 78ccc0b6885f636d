use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub pan_mode: bool,
    pub on_toggle_pan: Callback<()>,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset_view: Callback<()>,
    pub on_clear: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let pan_class = if props.pan_mode { "active" } else { "" };
    let pan_label = if props.pan_mode { "Pan mode OFF" } else { "Pan mode" };
    html! {<div style="display:flex; gap:6px; align-items:center; flex-wrap:wrap;">
        <button id="pan-toggle-btn" class={pan_class} onclick={emit(&props.on_toggle_pan)}>{ pan_label }</button>
        <button onclick={emit(&props.on_zoom_out)}> {"-"} </button>
        <button onclick={emit(&props.on_zoom_in)}> {"+"} </button>
        <button onclick={emit(&props.on_reset_view)}> {"Reset view"} </button>
        <span style="width:8px;"></span>
        <button id="clear-history-btn" onclick={emit(&props.on_clear)}> {"Clear measurements"} </button>
        <button onclick={emit(&props.on_open_settings)}> {"Settings"} </button>
    </div>}
}
