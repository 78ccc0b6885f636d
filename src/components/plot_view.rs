use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::geometry::Surface;
use crate::render::{build_scene, paint, CanvasMetrics};
use crate::state::{AppState, PlotAction};

#[derive(Properties, PartialEq, Clone)]
pub struct PlotViewProps {
    pub state: UseReducerHandle<AppState>,
    pub canvas_ref: NodeRef,
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
}

pub fn surface_of(canvas: &HtmlCanvasElement) -> Surface {
    Surface {
        width: canvas.width() as f64,
        height: canvas.height() as f64,
    }
}

/// Square canvas side for the current window width.
fn canvas_side(window_width: f64) -> u32 {
    if window_width < 768.0 {
        (window_width - 32.0).clamp(200.0, 400.0) as u32
    } else if window_width < 1024.0 {
        500
    } else {
        600
    }
}

fn redraw(canvas: &HtmlCanvasElement, state: &AppState) {
    if !canvas.is_connected() {
        return;
    }
    let Some(ctx) = context_2d(canvas) else { return; };
    let metrics = CanvasMetrics { ctx: ctx.clone() };
    paint(&ctx, &build_scene(state, &metrics));
}

fn touch_point(e: &TouchEvent, i: u32, canvas: &HtmlCanvasElement) -> Option<(f64, f64)> {
    let rect = canvas.get_bounding_client_rect();
    e.touches()
        .item(i)
        .map(|t| (t.client_x() as f64 - rect.left(), t.client_y() as f64 - rect.top()))
}

#[function_component(PlotView)]
pub fn plot_view(props: &PlotViewProps) -> Html {
    // Redraw whenever the reducer produced a new state
    {
        let canvas_ref = props.canvas_ref.clone();
        let state = props.state.clone();
        let version = props.state.version;
        use_effect_with(version, move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                redraw(&canvas, &state);
            }
            || ()
        });
    }

    // Mount: size the canvas once and attach input listeners
    {
        let canvas_ref = props.canvas_ref.clone();
        let dispatcher = props.state.dispatcher();
        let state = props.state.clone();
        use_effect_with((), move |_| {
            let canvas: Option<HtmlCanvasElement> = canvas_ref.cast();
            let window = web_sys::window();
            let mut cleanup: Option<Box<dyn FnOnce()>> = None;
            if let (Some(canvas), Some(window)) = (canvas, window) {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(1024.0);
                let side = canvas_side(width);
                canvas.set_width(side);
                canvas.set_height(side);
                redraw(&canvas, &state);
                dispatcher.dispatch(PlotAction::Resize {
                    surface: surface_of(&canvas),
                });

                let pointerdown_cb = {
                    let canvas = canvas.clone();
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: PointerEvent| {
                        if !e.is_primary() {
                            return;
                        }
                        e.prevent_default();
                        let _ = canvas.set_pointer_capture(e.pointer_id());
                        dispatcher.dispatch(PlotAction::PointerDown {
                            x: e.offset_x() as f64,
                            y: e.offset_y() as f64,
                        });
                    }) as Box<dyn FnMut(_)>)
                };
                let pointermove_cb = {
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: PointerEvent| {
                        if !e.is_primary() {
                            return;
                        }
                        dispatcher.dispatch(PlotAction::PointerMove {
                            x: e.offset_x() as f64,
                            y: e.offset_y() as f64,
                        });
                    }) as Box<dyn FnMut(_)>)
                };
                let pointerup_cb = {
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: PointerEvent| {
                        if !e.is_primary() {
                            return;
                        }
                        e.prevent_default();
                        dispatcher.dispatch(PlotAction::PointerUp {
                            x: e.offset_x() as f64,
                            y: e.offset_y() as f64,
                        });
                    }) as Box<dyn FnMut(_)>)
                };
                let pointercancel_cb = {
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |_e: PointerEvent| {
                        dispatcher.dispatch(PlotAction::PointerCancel);
                    }) as Box<dyn FnMut(_)>)
                };
                let wheel_cb = {
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: WheelEvent| {
                        e.prevent_default();
                        dispatcher.dispatch(PlotAction::Wheel {
                            x: e.offset_x() as f64,
                            y: e.offset_y() as f64,
                            delta_y: e.delta_y(),
                        });
                    }) as Box<dyn FnMut(_)>)
                };
                let dblclick_cb = {
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                        e.prevent_default();
                        dispatcher.dispatch(PlotAction::DoubleClick);
                    }) as Box<dyn FnMut(_)>)
                };
                // Touch events only drive pinch; single touches arrive as pointer events.
                let touch_start_cb = {
                    let canvas = canvas.clone();
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        if e.touches().length() >= 2 {
                            if let (Some(a), Some(b)) =
                                (touch_point(&e, 0, &canvas), touch_point(&e, 1, &canvas))
                            {
                                dispatcher.dispatch(PlotAction::PinchStart { a, b });
                            }
                            e.prevent_default();
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                let touch_move_cb = {
                    let canvas = canvas.clone();
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        if e.touches().length() >= 2 {
                            if let (Some(a), Some(b)) =
                                (touch_point(&e, 0, &canvas), touch_point(&e, 1, &canvas))
                            {
                                dispatcher.dispatch(PlotAction::PinchMove { a, b });
                            }
                            e.prevent_default();
                        }
                    }) as Box<dyn FnMut(_)>)
                };
                let touch_end_cb = {
                    let dispatcher = dispatcher.clone();
                    Closure::wrap(Box::new(move |e: TouchEvent| {
                        if e.touches().length() < 2 {
                            dispatcher.dispatch(PlotAction::PinchEnd);
                        }
                    }) as Box<dyn FnMut(_)>)
                };

                canvas
                    .add_event_listener_with_callback("pointerdown", pointerdown_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("pointermove", pointermove_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("pointerup", pointerup_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("pointercancel", pointercancel_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("dblclick", dblclick_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                    .ok();
                canvas
                    .add_event_listener_with_callback("touchcancel", touch_end_cb.as_ref().unchecked_ref())
                    .ok();

                let canvas_c = canvas.clone();
                cleanup = Some(Box::new(move || {
                    canvas_c
                        .remove_event_listener_with_callback("pointerdown", pointerdown_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("pointermove", pointermove_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("pointerup", pointerup_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("pointercancel", pointercancel_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("dblclick", dblclick_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                        .ok();
                    canvas_c
                        .remove_event_listener_with_callback("touchcancel", touch_end_cb.as_ref().unchecked_ref())
                        .ok();
                }) as Box<dyn FnOnce()>);
            } else {
                log::error!("plot canvas not mounted; input listeners not attached");
            }
            move || {
                if let Some(f) = cleanup {
                    f();
                }
            }
        });
    }

    let cursor = if !props.state.pan_mode {
        "crosshair"
    } else if props.state.pointer.down {
        "grabbing"
    } else {
        "grab"
    };
    html! {
        <canvas
            id="coordinate-plane"
            ref={props.canvas_ref.clone()}
            width="600"
            height="600"
            style={format!("background:#fff; border:1px solid #30363d; border-radius:8px; touch-action:none; cursor:{};", cursor)}
        />
    }
}
