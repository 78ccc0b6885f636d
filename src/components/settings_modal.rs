use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::Settings;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_reset_cb = {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |_| {
            cb.emit(Settings {
                reset_view_on_plot: !current.reset_view_on_plot,
                ..current.clone()
            })
        })
    };
    let unit_cb = {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(Settings {
                unit: input.value(),
                ..current.clone()
            })
        })
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; max-width:440px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.settings.reset_view_on_plot} onclick={toggle_reset_cb} />
                    <span>{"Reset pan/zoom when plotting"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px;">
                    <span>{"Distance unit"}</span>
                    <input type="text" style="width:60px;" value={props.settings.unit.clone()} oninput={unit_cb} />
                </label>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings are kept in this browser's local storage."}</div>
        </div>
    </div>}
}
