use glam::{Mat4, Vec3};
use js_sys::{Float32Array, Uint16Array};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::animator::FrameSnapshot;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::{ParticleField, TorusGeometry, TORUS_STRIDE};
use crate::viewport::Viewport;

use super::dom::js_error;
use super::{gradient, shaders};

const FLOAT_BYTES: i32 = 4;

struct Uniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            model: gl.get_uniform_location(program, "u_model"),
            view: gl.get_uniform_location(program, "u_view"),
            projection: gl.get_uniform_location(program, "u_projection"),
        }
    }

    fn upload(&self, gl: &GL, model: &Mat4, view: &Mat4, projection: &Mat4) {
        gl.uniform_matrix4fv_with_f32_array(self.model.as_ref(), false, &model.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(self.view.as_ref(), false, &view.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(
            self.projection.as_ref(),
            false,
            &projection.to_cols_array(),
        );
    }
}

struct ToonPass {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    index_count: i32,
    matrices: Uniforms,
    color: Option<WebGlUniformLocation>,
    light_dir: Option<WebGlUniformLocation>,
    light_intensity: Option<WebGlUniformLocation>,
    gradient: Option<WebGlUniformLocation>,
}

struct PointsPass {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    count: i32,
    matrices: Uniforms,
    color: Option<WebGlUniformLocation>,
    size: Option<WebGlUniformLocation>,
    scale: Option<WebGlUniformLocation>,
}

/// Draws the torus and the particle field onto the canvas. Clears to
/// transparent so the page background shows through.
pub struct WebGlRenderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    toon: ToonPass,
    points: PointsPass,
    gradient: WebGlTexture,
    aspect: f32,
    drawing_height: f32,
    material_color: [f32; 3],
    particle_color: [f32; 3],
    light_direction: Vec3,
    light_intensity: f32,
    particle_size: f32,
}

impl WebGlRenderer {
    pub fn new(canvas: HtmlCanvasElement, config: &SceneConfig) -> Result<Self, SceneError> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(js_error)?
            .ok_or(SceneError::WebGlUnsupported)?
            .dyn_into()
            .map_err(|_| SceneError::WebGlUnsupported)?;

        let torus = TorusGeometry::new(1.2, 0.11, 20, 100)?;
        let particles = ParticleField::generate(
            config.particle_count,
            config.object_distance,
            1,
            || js_sys::Math::random() as f32,
        );

        let toon = Self::toon_pass(&gl, &torus)?;
        let points = Self::points_pass(&gl, &particles)?;
        let gradient = gradient::load(&gl, &config.gradient_path)?;

        gl.enable(GL::DEPTH_TEST);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        Ok(Self {
            gl,
            canvas,
            toon,
            points,
            gradient,
            aspect: 1.0,
            drawing_height: 1.0,
            material_color: config.material_color,
            particle_color: config.particle_color,
            light_direction: config.light_direction,
            light_intensity: config.light_intensity,
            particle_size: config.particle_size,
        })
    }

    /// Size the backing store to the viewport at its pixel ratio and keep
    /// the CSS size in layout pixels.
    pub fn resize(&mut self, viewport: &Viewport) {
        let (w, h) = viewport.drawing_buffer_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        let sized = style
            .set_property("width", &format!("{}px", viewport.width))
            .and_then(|_| style.set_property("height", &format!("{}px", viewport.height)));
        if let Err(e) = sized {
            log::warn!("canvas style resize failed: {e:?}");
        }
        self.gl.viewport(0, 0, w as i32, h as i32);
        self.drawing_height = h as f32;
        self.aspect = viewport.aspect();
    }

    pub fn render(&mut self, frame: &FrameSnapshot) {
        let gl = &self.gl;
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        let projection = frame.camera.projection(self.aspect);
        let view = frame.camera.view_matrix();

        let mesh_model = Mat4::from_translation(frame.mesh_position.extend(0.0))
            * Mat4::from_rotation_x(frame.mesh_rotation.x)
            * Mat4::from_rotation_y(frame.mesh_rotation.y);

        let toon = &self.toon;
        gl.use_program(Some(&toon.program));
        toon.matrices.upload(gl, &mesh_model, &view, &projection);
        let [r, g, b] = self.material_color;
        gl.uniform3f(toon.color.as_ref(), r, g, b);
        let l = self.light_direction;
        gl.uniform3f(toon.light_dir.as_ref(), l.x, l.y, l.z);
        gl.uniform1f(toon.light_intensity.as_ref(), self.light_intensity);
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.gradient));
        gl.uniform1i(toon.gradient.as_ref(), 0);
        gl.bind_vertex_array(Some(&toon.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, toon.index_count, GL::UNSIGNED_SHORT, 0);

        let points = &self.points;
        let points_model = Mat4::from_rotation_y(frame.particle_rotation);
        gl.use_program(Some(&points.program));
        points
            .matrices
            .upload(gl, &points_model, &view, &projection);
        let [r, g, b] = self.particle_color;
        gl.uniform3f(points.color.as_ref(), r, g, b);
        gl.uniform1f(points.size.as_ref(), self.particle_size);
        gl.uniform1f(points.scale.as_ref(), self.drawing_height * 0.5);
        gl.bind_vertex_array(Some(&points.vao));
        gl.draw_arrays(GL::POINTS, 0, points.count);

        gl.bind_vertex_array(None);
    }

    fn toon_pass(gl: &GL, torus: &TorusGeometry) -> Result<ToonPass, SceneError> {
        let program = link_program(gl, shaders::TOON_VERTEX, shaders::TOON_FRAGMENT)?;
        let vao = gl
            .create_vertex_array()
            .ok_or(SceneError::Resource("torus vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        upload_f32(gl, GL::ARRAY_BUFFER, &torus.vertices, "torus vertices")?;
        let stride = TORUS_STRIDE as i32 * FLOAT_BYTES;
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(1, 3, GL::FLOAT, false, stride, 3 * FLOAT_BYTES);
        gl.enable_vertex_attrib_array(1);

        let index_buffer = gl
            .create_buffer()
            .ok_or(SceneError::Resource("torus indices"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        let indices = Uint16Array::from(torus.indices.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &indices, GL::STATIC_DRAW);
        gl.bind_vertex_array(None);

        Ok(ToonPass {
            matrices: Uniforms::locate(gl, &program),
            color: gl.get_uniform_location(&program, "u_color"),
            light_dir: gl.get_uniform_location(&program, "u_light_dir"),
            light_intensity: gl.get_uniform_location(&program, "u_light_intensity"),
            gradient: gl.get_uniform_location(&program, "u_gradient"),
            index_count: torus.indices.len() as i32,
            program,
            vao,
        })
    }

    fn points_pass(gl: &GL, field: &ParticleField) -> Result<PointsPass, SceneError> {
        let program = link_program(gl, shaders::POINTS_VERTEX, shaders::POINTS_FRAGMENT)?;
        let vao = gl
            .create_vertex_array()
            .ok_or(SceneError::Resource("particle vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        upload_f32(gl, GL::ARRAY_BUFFER, &field.positions, "particle positions")?;
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(0);

        gl.bind_vertex_array(None);

        Ok(PointsPass {
            matrices: Uniforms::locate(gl, &program),
            color: gl.get_uniform_location(&program, "u_color"),
            size: gl.get_uniform_location(&program, "u_size"),
            scale: gl.get_uniform_location(&program, "u_scale"),
            count: field.len() as i32,
            program,
            vao,
        })
    }
}

fn upload_f32(gl: &GL, target: u32, data: &[f32], what: &'static str) -> Result<(), SceneError> {
    let buffer = gl.create_buffer().ok_or(SceneError::Resource(what))?;
    gl.bind_buffer(target, Some(&buffer));
    let array = Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(target, &array, GL::STATIC_DRAW);
    Ok(())
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, SceneError> {
    let shader = gl
        .create_shader(kind)
        .ok_or(SceneError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(SceneError::ShaderCompile(log))
    }
}

fn link_program(gl: &GL, vertex: &str, fragment: &str) -> Result<WebGlProgram, SceneError> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vertex)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fragment)?;
    let program = gl
        .create_program()
        .ok_or(SceneError::Resource("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    // Shaders are owned by the program once linked.
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        Err(SceneError::ProgramLink(log))
    }
}
