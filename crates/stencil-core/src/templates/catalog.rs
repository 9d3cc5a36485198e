//! The packaged template catalog.
//!
//! Each entry's `base_dir` is relative to the `templates/` directory at the
//! repository root, which the CLI uses as its default asset root.
//!
//! ## Adding a new template
//!
//! 1. Create the source tree under `templates/<base_dir>`
//! 2. Add a definition to [`builtin_templates`]
//! 3. If the target language uses `{{`/`{%`, attach a [`DelimiterConfig`]
//! 4. List binary or pre-built files in `verbatim` so they are never rendered

use crate::templates::{DelimiterConfig, TemplateDefinition};

/// All built-in template definitions.
pub fn builtin_templates() -> Vec<TemplateDefinition> {
    vec![
        TemplateDefinition::new(
            "default",
            "A WAMP router speaking WebSocket plus Web server.",
            "default",
        ),
        TemplateDefinition::new(
            "pusher",
            "A WAMP router with a HTTP gateway for pushing events.",
            "pusher",
        ),
        TemplateDefinition::new(
            "hello:python",
            "A minimal Python WAMP application hosted in a router and a HTML5 client.",
            "hello/python",
        )
        .with_param("appname", "hello")
        .with_param("realm", "realm1"),
        TemplateDefinition::new(
            "hello:nodejs",
            "A minimal NodeJS WAMP application hosted in a router and a HTML5 client.",
            "hello/nodejs",
        )
        .with_param("appname", "hello")
        .with_param("realm", "realm1")
        .with_param("url", "ws://127.0.0.1:8080/ws")
        .with_param("nodejs", "/usr/bin/node"),
        TemplateDefinition::new(
            "hello:erwa",
            "A minimal Erlang/Erwa WAMP application hosted in a router and a HTML5 client.",
            "hello/erwa",
        )
        .with_hint(
            "Now build the Erlang/Erwa client by entering 'make', start Crossbar using \
             'crossbar start' and open http://localhost:8080 in your browser.",
        )
        .with_delimiters(DelimiterConfig::erlang())
        .with_verbatim("relx"),
        TemplateDefinition::new(
            "hello:php",
            "A minimal PHP/Thruway WAMP application hosted in a router and a HTML5 client.",
            "hello/php",
        )
        .with_hint(
            "Now install dependencies for the PHP/Thruway client by entering 'make install', \
             start Crossbar using 'crossbar start' and open http://localhost:8080 in your browser.",
        ),
    ]
}
