//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Charts are drawn by vega-embed, loaded from a CDN at startup. Rendering is
//! deferred with a small polling loop until the library and the container
//! element both exist, because Dioxus may mount the container after the
//! effect that requests the render.

/// Script tags injected once, in order (vega-embed depends on the other two).
const VEGA_SCRIPTS: [&str; 3] = [
    "https://cdn.jsdelivr.net/npm/vega@5",
    "https://cdn.jsdelivr.net/npm/vega-lite@5",
    "https://cdn.jsdelivr.net/npm/vega-embed@6",
];

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('Pedestrian chart JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a Rust string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Load vega, vega-lite and vega-embed. Safe to call more than once.
pub fn init_charts() {
    let sources = serde_json::to_string(&VEGA_SCRIPTS).unwrap_or_else(|_| "[]".to_string());
    call_js(&format!(
        r#"
        (function() {{
            if (window.__pedChartsLoading) return;
            window.__pedChartsLoading = true;
            var sources = {sources};
            function next(i) {{
                if (i >= sources.length) {{
                    window.__pedChartsReady = true;
                    console.log('Pedestrian charts initialized');
                    return;
                }}
                var s = document.createElement('script');
                s.src = sources[i];
                s.onload = function() {{ next(i + 1); }};
                s.onerror = function() {{ console.error('Failed to load', sources[i]); }};
                document.head.appendChild(s);
            }}
            next(0);
        }})();
        "#
    ));
}

/// Polls before a render gives up (100 ms apart).
const RENDER_MAX_ATTEMPTS: u32 = 150;

/// Render a Vega-Lite spec into the element with id `container_id`.
///
/// Every render and destroy bumps `window.__pedRenderSeq`. A pending poll or
/// an unfinished embed whose sequence number is no longer current does
/// nothing, so only the newest request ever reaches the container.
pub fn render_vega_chart(container_id: &str, spec_json: &str) {
    call_js(&render_script(container_id, spec_json));
}

fn render_script(container_id: &str, spec_json: &str) -> String {
    let id = js_string(container_id);
    let spec = js_string(spec_json);
    format!(
        r#"
        (function() {{
            var seq = window.__pedRenderSeq = (window.__pedRenderSeq || 0) + 1;
            var attempts = 0;
            var poll = setInterval(function() {{
                if (window.__pedRenderSeq !== seq) {{
                    clearInterval(poll);
                    return;
                }}
                if (++attempts > {max_attempts}) {{
                    clearInterval(poll);
                    console.warn('[ped] chart libraries not ready, giving up render', seq);
                    return;
                }}
                var el = document.getElementById({id});
                if (window.__pedChartsReady && typeof window.vegaEmbed !== 'undefined' && el) {{
                    clearInterval(poll);
                    var target = document.createElement('div');
                    window.vegaEmbed(target, JSON.parse({spec}), {{ actions: false }})
                        .then(function(result) {{
                            if (window.__pedRenderSeq !== seq) {{
                                result.finalize();
                                return;
                            }}
                            if (window.__pedView) window.__pedView.finalize();
                            window.__pedView = result;
                            el.replaceChildren(target);
                        }})
                        .catch(function(e) {{ console.error('[ped] vegaEmbed error:', e); }});
                }}
            }}, 100);
        }})();
        "#,
        max_attempts = RENDER_MAX_ATTEMPTS
    )
}

/// Destroy/clean up a chart in the given container.
///
/// Also cancels any render still waiting to be drawn.
pub fn destroy_chart(container_id: &str) {
    call_js(&destroy_script(container_id));
}

fn destroy_script(container_id: &str) -> String {
    format!(
        r#"
        window.__pedRenderSeq = (window.__pedRenderSeq || 0) + 1;
        if (window.__pedView) {{ window.__pedView.finalize(); window.__pedView = null; }}
        var el = document.getElementById({});
        if (el) el.innerHTML = '';
        "#,
        js_string(container_id)
    )
}
