//! Standalone HTML page around a [`RenderGraph`].
//!
//! The page pulls sigma.js 1.2.1 from its CDN, embeds the graph arrays as
//! a JSON literal and wires up the client-side controls. The script keeps
//! `{type, minStrength, selected}` and recomputes visibility and colors
//! from it on every change, the same derivation as [`crate::view::ViewState`].

use serde::Serialize;

use crate::config::VisualConfig;
use crate::error::KgvizError;
use crate::render::RenderGraph;

pub const SIGMA_CDN: &str = "https://cdn.jsdelivr.net/npm/sigma@1.2.1/build/sigma.min.js";

/// Values the client script needs from the graph config.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientStyle<'a> {
    node_color: &'a str,
    edge_color: &'a str,
    label_color: &'a str,
    node_size: f64,
    edge_size: f64,
    unconnected_color: &'a str,
    dim_color: &'a str,
}

impl<'a> From<&'a VisualConfig> for ClientStyle<'a> {
    fn from(config: &'a VisualConfig) -> Self {
        Self {
            node_color: &config.node.default_color,
            edge_color: &config.edge.default_color,
            label_color: &config.node.label_color,
            node_size: config.node.default_size,
            edge_size: config.edge.default_size,
            unconnected_color: &config.unconnected_color,
            dim_color: &config.dim_color,
        }
    }
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Graph: __TITLE__</title>
  <style>
    html, body { height: 100%; margin: 0; background: __BACKGROUND__; }
    #sigma-container { width: 100vw; height: 90vh; }
    #controls { padding: 10px; background: #f5f5f5; }
    label, select, input { margin-right: 10px; }
  </style>
  <script src="__SIGMA_CDN__"></script>
</head>
<body>
  <div id="controls">
    <label>Filter nodes by type: <select id="node-type-filter"><option value="">All</option></select></label>
    <label>Minimum edge strength: <input type="number" id="edge-strength-filter" min="0" max="100" value="0"></label>
    <button id="reset-filter">Reset filters</button>
    <span id="stats"></span>
  </div>
  <div id="sigma-container"></div>
  <script>
    var graph = __GRAPH__;
    var style = __STYLE__;
    var s = new sigma({
      graph: graph,
      container: 'sigma-container',
      settings: {
        defaultNodeColor: style.nodeColor,
        defaultEdgeColor: style.edgeColor,
        labelColor: 'default',
        defaultLabelColor: style.labelColor,
        defaultLabelSize: style.nodeSize,
        defaultEdgeLabelSize: style.edgeSize,
        minArrowSize: 10
      }
    });
    var state = { type: '', minStrength: 0, selected: null };

    document.getElementById('stats').textContent =
      'Nodes: ' + graph.nodes.length + ', Edges: ' + graph.edges.length;

    function baseNodeColor(n) {
      return n.unconnected ? style.unconnectedColor : style.nodeColor;
    }

    function apply() {
      var neighbors = null;
      if (state.selected !== null) {
        neighbors = {};
        neighbors[state.selected] = true;
        s.graph.edges().forEach(function(e) {
          if (e.source === state.selected) neighbors[e.target] = true;
          if (e.target === state.selected) neighbors[e.source] = true;
        });
      }
      s.graph.nodes().forEach(function(n) {
        n.hidden = !!state.type && (!n.type || n.type.indexOf(state.type) === -1);
        n.color = (neighbors === null || neighbors[n.id]) ? baseNodeColor(n) : style.dimColor;
      });
      s.graph.edges().forEach(function(e) {
        e.hidden = state.minStrength > 0 && (e.strength === null || e.strength < state.minStrength);
        var incident = state.selected === null || e.source === state.selected || e.target === state.selected;
        e.color = incident ? style.edgeColor : style.dimColor;
      });
      s.refresh();
    }

    var nodeTypeFilter = document.getElementById('node-type-filter');
    var allTypes = [];
    graph.nodes.forEach(function(n) {
      if (!n.type) return;
      n.type.split(',').forEach(function(t) {
        t = t.trim();
        if (t && allTypes.indexOf(t) === -1) allTypes.push(t);
      });
    });
    allTypes.forEach(function(type) {
      var opt = document.createElement('option');
      opt.value = type;
      opt.textContent = type;
      nodeTypeFilter.appendChild(opt);
    });
    nodeTypeFilter.onchange = function() {
      state.type = nodeTypeFilter.value;
      apply();
    };

    var edgeStrengthFilter = document.getElementById('edge-strength-filter');
    edgeStrengthFilter.oninput = function() {
      var v = parseInt(edgeStrengthFilter.value, 10);
      state.minStrength = isNaN(v) ? 0 : v;
      apply();
    };

    document.getElementById('reset-filter').onclick = function() {
      nodeTypeFilter.value = '';
      edgeStrengthFilter.value = 0;
      state = { type: '', minStrength: 0, selected: null };
      apply();
    };

    s.bind('clickNode', function(e) {
      state.selected = e.data.node.id;
      apply();
    });
    s.bind('clickStage', function() {
      state.selected = null;
      apply();
    });
  </script>
</body>
</html>
"#;

/// Serialize for embedding inside a `<script>` element. `<` only ever
/// occurs inside JSON strings, where `<` is an equivalent escape.
fn script_json<T: Serialize>(value: &T) -> Result<String, KgvizError> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A value placed inside a CSS declaration. Characters that could end the
/// declaration, the rule or the `<style>` element are dropped.
fn css_value(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect()
}

/// Substitute every placeholder in one left-to-right pass over `template`.
/// Inserted values are never scanned again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;
    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(*key).map(|at| (at, key.len(), *value)))
            .min_by_key(|(at, _, _)| *at);
        match next {
            Some((at, len, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + len..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Produce the full page for one graph.
pub fn render_document(
    graph: &RenderGraph,
    config: &VisualConfig,
    graph_name: &str,
) -> Result<String, KgvizError> {
    let title = escape_html(graph_name);
    let background = css_value(&config.background_color);
    let graph_json = script_json(graph)?;
    let style_json = script_json(&ClientStyle::from(config))?;

    Ok(fill_template(
        TEMPLATE,
        &[
            ("__TITLE__", title.as_str()),
            ("__BACKGROUND__", background.as_str()),
            ("__SIGMA_CDN__", SIGMA_CDN),
            ("__STYLE__", style_json.as_str()),
            ("__GRAPH__", graph_json.as_str()),
        ],
    ))
}
