//! Rewrites for `react-native`: every listed type is substituted by the
//! definitions in `tsflower/subst/react-native`.

use super::{ImportSubstitution, RewriteLibrary, RewriteRule, RewriteTable};

pub const SUBST_PREFIX: &str = "$tsflower_subst$RN$";
pub const SUBST_MODULE: &str = "tsflower/subst/react-native";

const SUBSTITUTED: &[&str] = &[
    "StyleProp",
    "ColorValue",
    "ViewStyle",
    "TextStyle",
    "ImageStyle",
    "GestureResponderEvent",
    "LayoutChangeEvent",
    "NativeSyntheticEvent",
    "EmitterSubscription",
    "EventEmitter",
    "NativeEventEmitter",
    "StatusBarAnimation",
];

/// Components, each substituted along with its `…Props` type.
const COMPONENTS: &[&str] = &[
    "DrawerLayoutAndroid",
    "FlatList",
    "Pressable",
    "ScrollView",
    "Switch",
    "TextInput",
    "Text",
    "TouchableHighlight",
    "TouchableNativeFeedback",
    "TouchableOpacity",
    "TouchableWithoutFeedback",
    "View",
];

/// Members of the `Animated` namespace.
const ANIMATED: &[&str] = &[
    "AnimatedAddition",
    "AnimatedInterpolation",
    "AnimationConfig",
    "DecayAnimationConfig",
    "SpringAnimationConfig",
    "TimingAnimationConfig",
    "WithAnimatedValue",
];

pub fn library() -> RewriteLibrary {
    let mut table = RewriteTable::new();
    for name in SUBSTITUTED {
        table = table.with_rule(*name, substitute(name, name));
    }
    for component in COMPONENTS {
        let props = format!("{component}Props");
        table = table
            .with_rule(*component, substitute(component, component))
            .with_rule(props.as_str(), substitute(&props, &props));
    }

    let mut animated = RewriteTable::new();
    for name in ANIMATED {
        animated = animated.with_rule(*name, substitute(name, &format!("Animated${name}")));
    }
    table = table.with_namespace("Animated", animated);

    RewriteLibrary {
        name: "react-native".into(),
        modules: vec!["react-native".into()],
        namespaces: Vec::new(),
        table,
        globals: RewriteTable::new(),
    }
}

fn substitute(import_name: &str, local_suffix: &str) -> RewriteRule {
    RewriteRule::ImportSubstitution(ImportSubstitution::new(
        import_name,
        format!("{SUBST_PREFIX}{local_suffix}"),
        SUBST_MODULE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_name(table: &RewriteTable, name: &[&str]) -> Option<String> {
        match table.lookup(name)? {
            RewriteRule::ImportSubstitution(subst) => Some(subst.local_name.clone()),
            RewriteRule::Macro(_) => None,
        }
    }

    #[test]
    fn test_component_and_props_substituted() {
        let library = library();
        assert_eq!(local_name(&library.table, &["View"]).as_deref(), Some("$tsflower_subst$RN$View"));
        assert_eq!(
            local_name(&library.table, &["ViewProps"]).as_deref(),
            Some("$tsflower_subst$RN$ViewProps")
        );
        assert_eq!(
            local_name(&library.table, &["StatusBarAnimation"]).as_deref(),
            Some("$tsflower_subst$RN$StatusBarAnimation")
        );
        // No `Props` variant for non-components.
        assert!(library.table.lookup(&["StylePropProps"]).is_none());
    }

    #[test]
    fn test_animated_namespace() {
        let library = library();
        assert_eq!(
            local_name(&library.table, &["Animated", "AnimatedInterpolation"]).as_deref(),
            Some("$tsflower_subst$RN$Animated$AnimatedInterpolation")
        );
        match library.table.lookup(&["Animated", "WithAnimatedValue"]) {
            Some(RewriteRule::ImportSubstitution(subst)) => {
                assert_eq!(subst.import_name, "WithAnimatedValue");
            }
            other => panic!("{other:?}"),
        }
        assert!(library.table.lookup(&["AnimatedInterpolation"]).is_none());
    }

    #[test]
    fn test_no_global_namespace() {
        let library = library();
        assert!(library.namespaces.is_empty());
        assert!(library.globals.rule_names().is_empty());
    }
}
