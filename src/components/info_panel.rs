use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct InfoPanelProps {
    pub lines: Vec<String>,
}

#[function_component]
pub fn InfoPanel(props: &InfoPanelProps) -> Html {
    let heading_style = "font-weight:600; margin-top:6px;";
    html! {
        <div id="info-display" style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-height:48px; font-size:14px; line-height:1.5; font-variant-numeric:tabular-nums;">
            { for props.lines.iter().map(|line| {
                let style = if line.ends_with(':') { heading_style } else { "" };
                html! { <div style={style}>{ line.clone() }</div> }
            }) }
        </div>
    }
}
