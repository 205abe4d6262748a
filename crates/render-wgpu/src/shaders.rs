/// WGSL shader for the textured cube.
///
/// Blinn-Phong style shading: ambient + diffuse + specular. Material
/// params pack roughness (x) and metalness (y); roughness drives the
/// specular exponent and strength, metalness tints the highlight toward
/// the base color. The pattern texture multiplies the flat color, so a
/// 1x1 white texture degenerates to flat-color shading.
pub const CUBE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
};

struct Material {
    color: vec4<f32>,
    // x = roughness, y = metallic
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(0) @binding(1)
var<uniform> material: Material;

@group(1) @binding(0)
var pattern_texture: texture_2d<f32>;

@group(1) @binding(1)
var pattern_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_position = vertex.position;
    out.world_normal = vertex.normal;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let pattern = textureSample(pattern_texture, pattern_sampler, in.uv);
    let base = material.color.rgb * pattern.rgb;

    let roughness = material.params.x;
    let metallic = material.params.y;

    let n = normalize(in.world_normal);
    let light_dir = normalize(vec3<f32>(0.4, 0.8, 0.6));
    let view_dir = normalize(uniforms.eye.xyz - in.world_position);
    let half_dir = normalize(light_dir + view_dir);

    let ambient = 0.25;
    let diffuse = max(dot(n, light_dir), 0.0) * 0.75;

    let shininess = mix(128.0, 4.0, roughness);
    let spec = pow(max(dot(n, half_dir), 0.0), shininess) * (1.0 - roughness);
    let spec_tint = mix(vec3<f32>(1.0), base, metallic);

    let color = base * (ambient + diffuse) + spec_tint * spec;
    return vec4<f32>(color, 1.0);
}
"#;
