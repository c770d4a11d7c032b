//! GLSL ES 3.0 sources.

/// Torus: position + normal, banded diffuse from the gradient map.
pub const TOON_VERTEX: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;

void main() {
    v_normal = normalize(mat3(u_model) * a_normal);
    gl_Position = u_projection * u_view * u_model * vec4(a_position, 1.0);
}
"#;

pub const TOON_FRAGMENT: &str = r#"#version 300 es
precision mediump float;

in vec3 v_normal;

uniform vec3 u_color;
uniform vec3 u_light_dir;
uniform float u_light_intensity;
uniform sampler2D u_gradient;

out vec4 out_color;

const float RECIPROCAL_PI = 0.3183098861837907;

void main() {
    // Half-Lambert coordinate into the gradient: each texel is one band.
    float d = dot(normalize(v_normal), normalize(u_light_dir));
    float band = texture(u_gradient, vec2(d * 0.5 + 0.5, 0.5)).r;
    vec3 lit = u_color * band * u_light_intensity * RECIPROCAL_PI;
    out_color = vec4(lit, 1.0);
}
"#;

/// Particles: one flat tint, size shrinking with distance.
pub const POINTS_VERTEX: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_size;
uniform float u_scale;

void main() {
    vec4 mv = u_view * u_model * vec4(a_position, 1.0);
    gl_Position = u_projection * mv;
    gl_PointSize = u_size * (u_scale / -mv.z);
}
"#;

pub const POINTS_FRAGMENT: &str = r#"#version 300 es
precision mediump float;

uniform vec3 u_color;

out vec4 out_color;

void main() {
    out_color = vec4(u_color, 1.0);
}
"#;
