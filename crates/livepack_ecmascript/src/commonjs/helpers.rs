use bitflags::bitflags;

bitflags! {
  /// Interop functions a rewritten module calls. Only the used ones are emitted.
  #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
  pub struct RuntimeHelpers: u8 {
    const IMPORT_DEFAULT = 1;
    const IMPORT_STAR = 1 << 1;
    const EXPORT = 1 << 2;
    const RE_EXPORT = 1 << 3;
  }
}

const IMPORT_DEFAULT: &str = r#"function __importDefault(mod) {
  return mod && (mod.__esModule || mod[Symbol.toStringTag] === "Module") ? mod : { "default": mod };
}
"#;

const IMPORT_STAR: &str = r#"function __importStar(mod) {
  if (mod && (mod.__esModule || mod[Symbol.toStringTag] === "Module")) return mod;
  var ns = { "default": mod };
  if (mod != null && (typeof mod === "object" || typeof mod === "function")) {
    for (var key in mod) {
      if (key !== "default" && Object.prototype.hasOwnProperty.call(mod, key)) ns[key] = mod[key];
    }
  }
  return ns;
}
"#;

const EXPORT: &str = r#"function __export(target, getters) {
  for (var name in getters) {
    Object.defineProperty(target, name, { enumerable: true, get: getters[name] });
  }
}
"#;

const RE_EXPORT: &str = r#"function __reExport(target, mod) {
  if (mod == null) return;
  Object.keys(mod).forEach(function (key) {
    if (key === "default" || Object.prototype.hasOwnProperty.call(target, key)) return;
    Object.defineProperty(target, key, {
      enumerable: true,
      get: function () { return mod[key]; }
    });
  });
}
"#;

impl RuntimeHelpers {
  pub fn render(self) -> String {
    let mut ret = String::new();
    for (flag, source) in [
      (Self::IMPORT_DEFAULT, IMPORT_DEFAULT),
      (Self::IMPORT_STAR, IMPORT_STAR),
      (Self::EXPORT, EXPORT),
      (Self::RE_EXPORT, RE_EXPORT),
    ] {
      if self.contains(flag) {
        ret.push_str(source);
      }
    }
    ret
  }
}

#[test]
fn renders_only_requested_helpers() {
  assert_eq!(RuntimeHelpers::empty().render(), "");
  let rendered = (RuntimeHelpers::EXPORT | RuntimeHelpers::IMPORT_DEFAULT).render();
  assert!(rendered.contains("function __importDefault"));
  assert!(rendered.contains("function __export"));
  assert!(!rendered.contains("function __importStar"));
  assert!(!rendered.contains("function __reExport"));
}
