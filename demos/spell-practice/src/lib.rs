use wasm_bindgen::prelude::*;
use quill_engine::*;

#[cfg(feature = "vectors")]
quill_web::export_game!(SpellGame, "spell-practice", vectors);
#[cfg(not(feature = "vectors"))]
quill_web::export_game!(SpellGame, "spell-practice");
