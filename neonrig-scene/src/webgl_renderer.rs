//! WebGL2 renderer for the rig

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};
use crate::error::{Result, SceneError};
use crate::primitives::Color;
use crate::three_d::{Camera3D, DrawItem, Light, LightType, Material3D, Mesh3D, Scene3D};
use crate::viewport::{RenderSurface, Viewport};
use glam::{Mat4, Vec3};
use std::collections::HashMap;

const MAX_POINT_LIGHTS: usize = 4;

/// Vertex shader for 3D rendering
const VERTEX_SHADER_SOURCE: &str = r#"#version 300 es
precision highp float;

in vec3 a_position;
in vec3 a_normal;
in vec2 a_texcoord;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform mat4 u_normalMatrix;

out vec3 v_position;
out vec3 v_normal;
out vec2 v_texcoord;

void main() {
    vec4 worldPos = u_model * vec4(a_position, 1.0);
    v_position = worldPos.xyz;
    v_normal = normalize((u_normalMatrix * vec4(a_normal, 0.0)).xyz);
    v_texcoord = a_texcoord;

    gl_Position = u_projection * u_view * worldPos;
}
"#;

/// Fragment shader: Blinn-Phong with a metalness split, emissive term and ACES tone mapping
const FRAGMENT_SHADER_SOURCE: &str = r#"#version 300 es
precision highp float;

in vec3 v_position;
in vec3 v_normal;
in vec2 v_texcoord;

uniform vec3 u_cameraPosition;
uniform vec4 u_baseColor;
uniform float u_metallic;
uniform float u_roughness;
uniform vec3 u_emissive;

uniform vec3 u_ambientLight;
uniform vec3 u_lightDirection;
uniform vec3 u_lightColor;

uniform int u_pointCount;
uniform vec3 u_pointPositions[4];
uniform vec3 u_pointColors[4];
uniform float u_pointRanges[4];

uniform float u_exposure;

out vec4 fragColor;

vec3 acesFilm(vec3 x) {
    return clamp((x * (2.51 * x + 0.03)) / (x * (2.43 * x + 0.59) + 0.14), 0.0, 1.0);
}

vec3 shade(vec3 normal, vec3 viewDir, vec3 lightDir, vec3 radiance) {
    float NdotL = max(dot(normal, lightDir), 0.0);
    vec3 halfVector = normalize(lightDir + viewDir);
    float shininess = mix(256.0, 4.0, u_roughness);
    float specular = pow(max(dot(normal, halfVector), 0.0), shininess) * (1.0 - 0.9 * u_roughness);

    vec3 diffuseColor = u_baseColor.rgb * (1.0 - u_metallic);
    vec3 specularColor = mix(vec3(0.04), u_baseColor.rgb, u_metallic);
    return (diffuseColor * NdotL + specularColor * specular) * radiance;
}

void main() {
    vec3 normal = normalize(v_normal);
    if (!gl_FrontFacing) {
        normal = -normal;
    }
    vec3 viewDir = normalize(u_cameraPosition - v_position);

    vec3 color = u_ambientLight * u_baseColor.rgb;
    color += shade(normal, viewDir, normalize(-u_lightDirection), u_lightColor);

    for (int i = 0; i < 4; i++) {
        if (i >= u_pointCount) {
            break;
        }
        vec3 toLight = u_pointPositions[i] - v_position;
        float dist = max(length(toLight), 1e-4);
        float falloff = 1.0;
        if (u_pointRanges[i] > 0.0) {
            falloff = pow(clamp(1.0 - dist / u_pointRanges[i], 0.0, 1.0), 2.0);
        }
        color += shade(normal, viewDir, toLight / dist, u_pointColors[i] * falloff);
    }

    color += u_emissive;
    color = acesFilm(color * u_exposure);
    color = pow(color, vec3(1.0 / 2.2));

    // Premultiplied for the transparent canvas
    fragColor = vec4(color * u_baseColor.a, u_baseColor.a);
}
"#;

/// WebGL-based 3D renderer drawing into a transparent canvas
pub struct WebGLRenderer {
    canvas: HtmlCanvasElement,
    gl: WebGl2RenderingContext,
    program: WebGlProgram,
    // Attribute locations
    position_attrib: u32,
    normal_attrib: u32,
    texcoord_attrib: u32,
    // Uniform locations
    uniforms: HashMap<&'static str, WebGlUniformLocation>,
    // Mesh buffers, keyed by mesh index
    mesh_buffers: HashMap<usize, MeshBuffers>,
    viewport: Viewport,
    exposure: f32,
}

struct MeshBuffers {
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    index_count: i32,
}

const UNIFORM_NAMES: [&str; 17] = [
    "u_model", "u_view", "u_projection", "u_normalMatrix",
    "u_cameraPosition", "u_baseColor", "u_metallic", "u_roughness", "u_emissive",
    "u_ambientLight", "u_lightDirection", "u_lightColor",
    "u_pointCount", "u_pointPositions", "u_pointColors", "u_pointRanges",
    "u_exposure",
];

impl WebGLRenderer {
    /// Create a canvas, acquire a WebGL2 context and compile the shaders
    pub fn new(canvas: HtmlCanvasElement, viewport: Viewport, exposure: f32) -> Result<Self> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"premultipliedAlpha".into(), &JsValue::TRUE)?;

        let gl = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or_else(|| SceneError::Graphics("Failed to get WebGL2 context".to_string()))?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| SceneError::Graphics("Context is not WebGL2".to_string()))?;

        // Compile shaders
        let vertex_shader = compile_shader(&gl, WebGl2RenderingContext::VERTEX_SHADER, VERTEX_SHADER_SOURCE)?;
        let fragment_shader = compile_shader(&gl, WebGl2RenderingContext::FRAGMENT_SHADER, FRAGMENT_SHADER_SOURCE)?;

        // Create program
        let program = gl.create_program()
            .ok_or_else(|| SceneError::Graphics("Failed to create program".to_string()))?;

        gl.attach_shader(&program, &vertex_shader);
        gl.attach_shader(&program, &fragment_shader);
        gl.link_program(&program);

        if !gl.get_program_parameter(&program, WebGl2RenderingContext::LINK_STATUS).as_bool().unwrap_or(false) {
            let error = gl.get_program_info_log(&program).unwrap_or_else(|| "Unknown error".to_string());
            return Err(SceneError::Graphics(format!("Failed to link program: {}", error)));
        }

        // Get attribute locations
        let position_attrib = gl.get_attrib_location(&program, "a_position") as u32;
        let normal_attrib = gl.get_attrib_location(&program, "a_normal") as u32;
        let texcoord_attrib = gl.get_attrib_location(&program, "a_texcoord") as u32;

        // Unused uniforms are optimised out and simply missing from the map
        let mut uniforms = HashMap::new();
        for name in UNIFORM_NAMES {
            if let Some(location) = gl.get_uniform_location(&program, name) {
                uniforms.insert(name, location);
            }
        }

        gl.enable(WebGl2RenderingContext::DEPTH_TEST);
        gl.blend_func(WebGl2RenderingContext::ONE, WebGl2RenderingContext::ONE_MINUS_SRC_ALPHA);

        let mut renderer = Self {
            canvas,
            gl,
            program,
            position_attrib,
            normal_attrib,
            texcoord_attrib,
            uniforms,
            mesh_buffers: HashMap::new(),
            viewport,
            exposure,
        };
        renderer.set_size(viewport);
        Ok(renderer)
    }

    /// The canvas being drawn into
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Render a 3D scene
    pub fn render_scene(&mut self, scene: &Scene3D) -> Result<()> {
        {
            let gl = &self.gl;
            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(WebGl2RenderingContext::COLOR_BUFFER_BIT | WebGl2RenderingContext::DEPTH_BUFFER_BIT);
            gl.use_program(Some(&self.program));
        }

        self.set_camera_uniforms(&scene.camera);
        self.set_lighting_uniforms(&scene.lights);
        if let Some(location) = self.uniforms.get("u_exposure") {
            self.gl.uniform1f(Some(location), self.exposure);
        }

        // Opaque first, then glass without depth writes
        let (transparent, opaque): (Vec<DrawItem>, Vec<DrawItem>) = scene
            .draw_list()
            .into_iter()
            .partition(|item| {
                scene
                    .meshes
                    .get(item.mesh_index)
                    .and_then(|mesh| scene.material_for(mesh))
                    .map(Material3D::is_transparent)
                    .unwrap_or(false)
            });

        for item in &opaque {
            self.draw_item(scene, item)?;
        }

        if !transparent.is_empty() {
            self.gl.enable(WebGl2RenderingContext::BLEND);
            self.gl.depth_mask(false);
            for item in &transparent {
                self.draw_item(scene, item)?;
            }
            self.gl.depth_mask(true);
            self.gl.disable(WebGl2RenderingContext::BLEND);
        }

        Ok(())
    }

    /// Set camera-related uniforms
    fn set_camera_uniforms(&self, camera: &Camera3D) {
        let gl = &self.gl;

        if let Some(location) = self.uniforms.get("u_view") {
            gl.uniform_matrix4fv_with_f32_array(Some(location), false, &mat4_to_array(&camera.view_matrix()));
        }

        if let Some(location) = self.uniforms.get("u_projection") {
            gl.uniform_matrix4fv_with_f32_array(Some(location), false, &mat4_to_array(&camera.projection_matrix()));
        }

        if let Some(location) = self.uniforms.get("u_cameraPosition") {
            gl.uniform3f(Some(location), camera.position.x, camera.position.y, camera.position.z);
        }
    }

    /// Set lighting uniforms
    fn set_lighting_uniforms(&self, lights: &[Light]) {
        let gl = &self.gl;

        let mut ambient = Color::BLACK;
        let mut light_dir = Vec3::new(-0.3, -1.0, -0.5);
        let mut light_color = Color::BLACK;
        let mut point_positions = [0.0f32; MAX_POINT_LIGHTS * 3];
        let mut point_colors = [0.0f32; MAX_POINT_LIGHTS * 3];
        let mut point_ranges = [0.0f32; MAX_POINT_LIGHTS];
        let mut point_count = 0usize;

        for light in lights.iter().filter(|light| light.enabled) {
            match &light.light_type {
                LightType::Ambient { color, intensity } => {
                    ambient = color.scaled(*intensity);
                }
                LightType::Directional { direction, color, intensity } => {
                    light_dir = *direction;
                    light_color = color.scaled(*intensity);
                }
                LightType::Point { position, color, intensity, range } => {
                    if point_count == MAX_POINT_LIGHTS {
                        log::debug!("Ignoring point light '{}': limit reached", light.id);
                        continue;
                    }
                    let radiance = color.scaled(*intensity);
                    point_positions[point_count * 3..point_count * 3 + 3].copy_from_slice(&position.to_array());
                    point_colors[point_count * 3..point_count * 3 + 3]
                        .copy_from_slice(&[radiance.r, radiance.g, radiance.b]);
                    point_ranges[point_count] = *range;
                    point_count += 1;
                }
            }
        }

        if let Some(location) = self.uniforms.get("u_ambientLight") {
            gl.uniform3f(Some(location), ambient.r, ambient.g, ambient.b);
        }
        if let Some(location) = self.uniforms.get("u_lightDirection") {
            let dir = light_dir.normalize_or_zero();
            gl.uniform3f(Some(location), dir.x, dir.y, dir.z);
        }
        if let Some(location) = self.uniforms.get("u_lightColor") {
            gl.uniform3f(Some(location), light_color.r, light_color.g, light_color.b);
        }
        if let Some(location) = self.uniforms.get("u_pointCount") {
            gl.uniform1i(Some(location), point_count as i32);
        }
        if let Some(location) = self.uniforms.get("u_pointPositions") {
            gl.uniform3fv_with_f32_array(Some(location), &point_positions);
        }
        if let Some(location) = self.uniforms.get("u_pointColors") {
            gl.uniform3fv_with_f32_array(Some(location), &point_colors);
        }
        if let Some(location) = self.uniforms.get("u_pointRanges") {
            gl.uniform1fv_with_f32_array(Some(location), &point_ranges);
        }
    }

    fn draw_item(&mut self, scene: &Scene3D, item: &DrawItem) -> Result<()> {
        let Some(mesh) = scene.meshes.get(item.mesh_index) else {
            return Ok(());
        };

        if !self.mesh_buffers.contains_key(&item.mesh_index) {
            self.upload_mesh(item.mesh_index, mesh)?;
        }

        let default_material = Material3D::default();
        let material = scene.material_for(mesh).unwrap_or(&default_material);
        self.render_mesh(item, material);
        Ok(())
    }

    /// Render a single mesh
    fn render_mesh(&self, item: &DrawItem, material: &Material3D) {
        let gl = &self.gl;
        let Some(buffers) = self.mesh_buffers.get(&item.mesh_index) else {
            return;
        };

        if let Some(location) = self.uniforms.get("u_model") {
            gl.uniform_matrix4fv_with_f32_array(Some(location), false, &mat4_to_array(&item.world));
        }

        if let Some(location) = self.uniforms.get("u_normalMatrix") {
            let normal_matrix = item.world.inverse().transpose();
            gl.uniform_matrix4fv_with_f32_array(Some(location), false, &mat4_to_array(&normal_matrix));
        }

        self.set_material_uniforms(material);

        if material.double_sided {
            gl.disable(WebGl2RenderingContext::CULL_FACE);
        } else {
            gl.enable(WebGl2RenderingContext::CULL_FACE);
        }

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffers.vertex_buffer));

        let stride = 8 * 4; // 8 floats per vertex
        gl.vertex_attrib_pointer_with_i32(self.position_attrib, 3, WebGl2RenderingContext::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(self.position_attrib);

        gl.vertex_attrib_pointer_with_i32(self.normal_attrib, 3, WebGl2RenderingContext::FLOAT, false, stride, 3 * 4);
        gl.enable_vertex_attrib_array(self.normal_attrib);

        gl.vertex_attrib_pointer_with_i32(self.texcoord_attrib, 2, WebGl2RenderingContext::FLOAT, false, stride, 6 * 4);
        gl.enable_vertex_attrib_array(self.texcoord_attrib);

        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&buffers.index_buffer));
        gl.draw_elements_with_i32(
            WebGl2RenderingContext::TRIANGLES,
            buffers.index_count,
            WebGl2RenderingContext::UNSIGNED_SHORT,
            0,
        );
    }

    /// Upload mesh data to GPU
    fn upload_mesh(&mut self, mesh_index: usize, mesh: &Mesh3D) -> Result<()> {
        if mesh.vertices.len() > u16::MAX as usize {
            return Err(SceneError::Graphics(format!(
                "Mesh '{}' has {} vertices, more than 16-bit indices can address",
                mesh.name,
                mesh.vertices.len()
            )));
        }

        let gl = &self.gl;

        let mut vertex_data = Vec::with_capacity(mesh.vertices.len() * 8);
        for vertex in &mesh.vertices {
            vertex_data.extend_from_slice(&vertex.position.to_array());
            vertex_data.extend_from_slice(&vertex.normal.to_array());
            vertex_data.extend_from_slice(&vertex.tex_coords.to_array());
        }

        let vertex_buffer = gl.create_buffer()
            .ok_or_else(|| SceneError::Graphics("Failed to create vertex buffer".to_string()))?;

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&vertex_buffer));

        // The views must not outlive the vectors and nothing may allocate in between
        unsafe {
            let array = js_sys::Float32Array::view(&vertex_data);
            gl.buffer_data_with_array_buffer_view(
                WebGl2RenderingContext::ARRAY_BUFFER,
                &array,
                WebGl2RenderingContext::STATIC_DRAW,
            );
        }

        let index_data: Vec<u16> = mesh.indices.iter()
            .map(|&i| i as u16)
            .collect();

        let index_buffer = gl.create_buffer()
            .ok_or_else(|| SceneError::Graphics("Failed to create index buffer".to_string()))?;

        gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));

        unsafe {
            let array = js_sys::Uint16Array::view(&index_data);
            gl.buffer_data_with_array_buffer_view(
                WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER,
                &array,
                WebGl2RenderingContext::STATIC_DRAW,
            );
        }

        self.mesh_buffers.insert(
            mesh_index,
            MeshBuffers {
                vertex_buffer,
                index_buffer,
                index_count: mesh.indices.len() as i32,
            },
        );

        Ok(())
    }

    /// Set material uniforms
    fn set_material_uniforms(&self, material: &Material3D) {
        let gl = &self.gl;
        let base = material.base_color;
        let emissive = material.emitted();

        if let Some(location) = self.uniforms.get("u_baseColor") {
            gl.uniform4f(Some(location), base.r, base.g, base.b, material.opacity);
        }
        if let Some(location) = self.uniforms.get("u_metallic") {
            gl.uniform1f(Some(location), material.metallic);
        }
        if let Some(location) = self.uniforms.get("u_roughness") {
            gl.uniform1f(Some(location), material.roughness);
        }
        if let Some(location) = self.uniforms.get("u_emissive") {
            gl.uniform3f(Some(location), emissive.r, emissive.g, emissive.b);
        }
    }
}

impl RenderSurface for WebGLRenderer {
    fn set_size(&mut self, viewport: Viewport) {
        let (width, height) = viewport.drawing_buffer_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));

        self.gl.viewport(0, 0, width as i32, height as i32);
        self.viewport = viewport;
    }

    fn size(&self) -> Viewport {
        self.viewport
    }

    fn render(&mut self, scene: &Scene3D) -> Result<()> {
        self.render_scene(scene)
    }
}

/// Compile a shader
fn compile_shader(
    gl: &WebGl2RenderingContext,
    shader_type: u32,
    source: &str,
) -> Result<WebGlShader> {
    let shader = gl.create_shader(shader_type)
        .ok_or_else(|| SceneError::Graphics("Failed to create shader".to_string()))?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl.get_shader_parameter(&shader, WebGl2RenderingContext::COMPILE_STATUS).as_bool().unwrap_or(false) {
        let error = gl.get_shader_info_log(&shader).unwrap_or_else(|| "Unknown error".to_string());
        return Err(SceneError::Graphics(format!("Failed to compile shader: {}", error)));
    }

    Ok(shader)
}

/// Convert Mat4 to array for WebGL
fn mat4_to_array(mat: &Mat4) -> [f32; 16] {
    mat.to_cols_array()
}
