use std::rc::Rc;

use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::{
    camera_controls::CameraControls,
    info_panel::InfoPanel,
    plot_view::{context_2d, surface_of, PlotView},
    point_form::PointForm,
    settings_modal::SettingsModal,
};
use crate::config::{PlotConfig, Settings};
use crate::hit::{FixedAdvance, LabelMetrics};
use crate::render::CanvasMetrics;
use crate::state::{AppState, PlotAction, RowField};

#[function_component(App)]
pub fn app() -> Html {
    let state = use_reducer(|| AppState::new(PlotConfig::default(), Settings::load_or_default()));
    let canvas_ref = use_node_ref();
    let open_settings = use_state(|| false);

    // Persist settings changes
    {
        let settings = state.settings.clone();
        use_effect_with(settings, move |settings| {
            if let Err(e) = settings.save() {
                log::warn!("settings not saved: {}", e);
            }
            || ()
        });
    }

    let on_edit = {
        let state = state.clone();
        Callback::from(move |(index, field, value): (usize, RowField, String)| {
            state.dispatch(PlotAction::EditRow { index, field, value });
        })
    };
    let on_add = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(PlotAction::AddRow))
    };
    let on_remove = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(PlotAction::RemoveRow))
    };
    let on_plot = {
        let state = state.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |_: ()| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                log::error!("plot requested before the canvas was mounted");
                return;
            };
            let metrics: Rc<dyn LabelMetrics> = match context_2d(&canvas) {
                Some(ctx) => Rc::new(CanvasMetrics { ctx }),
                None => Rc::new(FixedAdvance::default()),
            };
            state.dispatch(PlotAction::Plot {
                surface: surface_of(&canvas),
                metrics,
            });
        })
    };

    let zoom_at_center = |zoom_in: bool| {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let surface = state.registry.fit.surface;
            state.dispatch(PlotAction::ZoomStep {
                x: surface.width * 0.5,
                y: surface.height * 0.5,
                zoom_in,
            });
        })
    };
    let dispatch_cb = |action: PlotAction| {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(action.clone()))
    };
    let open_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: ()| open_settings.set(true))
    };
    let close_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: ()| open_settings.set(false))
    };
    let on_settings_change = {
        let state = state.clone();
        Callback::from(move |s: Settings| state.dispatch(PlotAction::UpdateSettings(s)))
    };

    html! {
        <div class="container" style="position:relative; max-width:1040px; margin:0 auto; padding:16px; display:flex; flex-wrap:wrap; gap:16px;">
            <div style="flex:1 1 320px; display:flex; flex-direction:column; gap:12px;">
                <h2 style="margin:0;">{"Coordinate Plotter"}</h2>
                <PointForm
                    rows={state.rows.clone()}
                    on_edit={on_edit}
                    on_add={on_add}
                    on_remove={on_remove}
                    on_plot={on_plot}
                />
                <CameraControls
                    pan_mode={state.pan_mode}
                    on_toggle_pan={dispatch_cb(PlotAction::TogglePanMode)}
                    on_zoom_in={zoom_at_center(true)}
                    on_zoom_out={zoom_at_center(false)}
                    on_reset_view={dispatch_cb(PlotAction::ResetView)}
                    on_clear={dispatch_cb(PlotAction::ClearMeasurements)}
                    on_open_settings={open_settings_cb}
                />
                <InfoPanel lines={state.info_lines()} />
            </div>
            <div style="flex:0 0 auto;">
                <PlotView state={state.clone()} canvas_ref={canvas_ref.clone()} />
            </div>
            <SettingsModal
                show={*open_settings}
                settings={state.settings.clone()}
                on_change={on_settings_change}
                on_close={close_settings_cb}
            />
        </div>
    }
}
