use super::*;

#[test]
fn last_write_wins_per_name() {
    let mut store = ParamStore::new();
    store.set_scalar("u_metallic", 0.2);
    store.set_scalar("u_metallic", 0.8);
    assert_eq!(store.scalar("u_metallic"), Some(0.8));

    store.set_vector("u_base_color", [1.0, 0.0, 0.0, 1.0]);
    store.set_vector("u_base_color", [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(store.vector("u_base_color"), Some([0.0, 1.0, 0.0, 1.0]));

    store.set_texture("u_base_texture", TextureId(7));
    store.set_texture("u_base_texture", TextureId(9));
    assert_eq!(store.texture("u_base_texture"), Some(TextureId(9)));
}

#[test]
fn kinds_are_namespaced_independently() {
    let mut store = ParamStore::new();
    store.set_scalar("shared", 1.0);
    store.set_vector("shared", [0.0; 4]);
    store.set_texture("shared", TextureId(1));

    assert_eq!(store.scalar("shared"), Some(1.0));
    assert_eq!(store.vector("shared"), Some([0.0; 4]));
    assert_eq!(store.texture("shared"), Some(TextureId(1)));
}

#[test]
fn flags_toggle_as_a_set() {
    let mut store = ParamStore::new();
    assert!(!store.flag_enabled("HAS_NORMAL_TEXTURE"));

    store.enable_flag("HAS_NORMAL_TEXTURE");
    store.enable_flag("HAS_NORMAL_TEXTURE");
    assert!(store.flag_enabled("HAS_NORMAL_TEXTURE"));

    store.disable_flag("HAS_NORMAL_TEXTURE");
    assert!(!store.flag_enabled("HAS_NORMAL_TEXTURE"));
    // Disabling an unset flag is a no-op.
    store.disable_flag("HAS_EMISSIVE_TEXTURE");
}

#[test]
fn missing_names_read_back_as_none() {
    let store = ParamStore::new();
    assert_eq!(store.scalar("nope"), None);
    assert_eq!(store.vector("nope"), None);
    assert_eq!(store.texture("nope"), None);
}
