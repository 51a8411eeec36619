//! Canned documents.
//!
//! `*_POST` fixtures carry `title: Hello`, `tags: [a, b]` and the body
//! `Body text.` in their respective formats.

/// YAML frontmatter post.
pub const YAML_POST: &str = "---
title: Hello
tags:
  - a
  - b
---

Body text.
";

/// TOML frontmatter post.
pub const TOML_POST: &str = "+++
title = \"Hello\"
tags = [\"a\", \"b\"]
+++

Body text.
";

/// A post whose frontmatter is never closed.
pub const UNCLOSED_POST: &str = "---
title: Hello

Body text.
";

/// Frontmatter delimiters around YAML that does not parse.
pub const BROKEN_YAML_POST: &str = "---
title: [unclosed
---

Body text.
";

/// No frontmatter at all.
pub const PLAIN_POST: &str = "# Heading

Body text.
";

/// Nested structures and mixed scalar types.
pub const RICH_YAML_POST: &str = "---
title: Rich
draft: false
weight: 2.5
count: 7
author:
  name: Ann
  links:
    - https://example.com
empty: null
---

# Rich

Paragraph with --- inside it.
";
