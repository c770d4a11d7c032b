use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::SceneError;

use super::dom::js_error;

/// Three gray bands, used until (or instead of) the gradient image.
pub(super) const FALLBACK_BANDS: [u8; 12] = [
    80, 80, 80, 255, //
    160, 160, 160, 255, //
    255, 255, 255, 255,
];

/// Create the toon gradient texture. The fallback bands are uploaded right
/// away; the image at `path` replaces them once it loads. A failed load only
/// logs, the scene keeps rendering with the fallback.
pub fn load(gl: &GL, path: &str) -> Result<WebGlTexture, SceneError> {
    let texture = gl
        .create_texture()
        .ok_or(SceneError::Resource("gradient texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        (FALLBACK_BANDS.len() / 4) as i32,
        1,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(&FALLBACK_BANDS[..]),
    )
    .map_err(js_error)?;
    set_nearest(gl);

    let image = HtmlImageElement::new().map_err(js_error)?;

    let onload = {
        let gl = gl.clone();
        let texture = texture.clone();
        let image = image.clone();
        Closure::wrap(Box::new(move || {
            gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
            let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                GL::TEXTURE_2D,
                0,
                GL::RGBA as i32,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                &image,
            );
            match uploaded {
                Ok(()) => {
                    set_nearest(&gl);
                    log::info!("gradient loaded ({}px)", image.natural_width());
                }
                Err(e) => log::warn!("gradient upload failed: {e:?}"),
            }
        }) as Box<dyn FnMut()>)
    };
    let onerror = {
        let path = path.to_string();
        Closure::wrap(Box::new(move || {
            log::warn!("gradient {path} failed to load, using fallback bands");
        }) as Box<dyn FnMut()>)
    };
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();
    image.set_src(path);

    Ok(texture)
}

/// Nearest filtering keeps the bands hard-edged.
fn set_nearest(gl: &GL) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::NEAREST as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::NEAREST as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}
