use navprims_stream::{ChannelOpener, ChannelPool, Direction, Resolver};

use crate::cmd::ResolveArgs;
use crate::exit::{stream_error, CliResult, SUCCESS};
use crate::output::{print_resolutions, OutputFormat, ResolutionOutput};

pub fn run(args: ResolveArgs, format: OutputFormat) -> CliResult<i32> {
    let mut pool = ChannelPool::new();
    let mut resolver = Resolver::new();
    let rows = resolve_all(
        &mut resolver,
        &mut pool,
        &args.specs,
        args.direction.into(),
        args.force_file,
    )?;
    pool.teardown()
        .map_err(|err| stream_error("teardown failed", err))?;

    print_resolutions(&rows, format);
    Ok(SUCCESS)
}

fn resolve_all<O: ChannelOpener>(
    resolver: &mut Resolver<O>,
    pool: &mut ChannelPool,
    specs: &[String],
    direction: Direction,
    force_file: bool,
) -> CliResult<Vec<ResolutionOutput>> {
    let mut rows = Vec::with_capacity(specs.len());
    for spec in specs {
        let context = format!("cannot resolve {spec}");
        let specifier = resolver
            .classify(spec, force_file)
            .map_err(|err| stream_error(&context, err))?;
        let key = specifier.pool_key(direction);
        let reused = key.as_ref().is_some_and(|key| pool.contains(key));
        let endpoint = resolver
            .resolve(pool, spec, direction, force_file)
            .map_err(|err| stream_error(&context, err))?;

        rows.push(ResolutionOutput {
            specifier: spec.clone(),
            kind: specifier.kind(),
            direction: direction.to_string(),
            pool_key: key.map(|key| key.to_string()),
            reused,
            target: endpoint.label(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::Path;

    use navprims_stream::{Channel, ResolverConfig, Result as StreamResult};

    use super::*;

    struct MemOpener;

    impl ChannelOpener for MemOpener {
        fn open_serial(&mut self, device: &str, baud_rate: Option<u32>) -> StreamResult<Channel> {
            Ok(Channel::from_stream(device, Cursor::new(Vec::new())).with_baud_rate(baud_rate))
        }

        fn open_file(&mut self, path: &Path, _direction: Direction) -> StreamResult<Channel> {
            Ok(Channel::from_stream(
                path.display().to_string(),
                Cursor::new(Vec::new()),
            ))
        }
    }

    #[test]
    fn repeated_specifiers_are_reported_as_reused() {
        let mut resolver = Resolver::with_config(
            MemOpener,
            ResolverConfig {
                serial_prefix: "/dev/tty".to_string(),
            },
        );
        let mut pool = ChannelPool::new();
        let specs: Vec<String> = ["a.bin", "a.bin", "-", "/dev/ttyS0:9600", "/dev/ttyS0"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = resolve_all(&mut resolver, &mut pool, &specs, Direction::Output, false).unwrap();

        let reused: Vec<bool> = rows.iter().map(|r| r.reused).collect();
        assert_eq!(reused, vec![false, true, false, false, true]);
        assert_eq!(rows[2].kind, "standard");
        assert_eq!(rows[2].pool_key, None);
        assert_eq!(rows[2].target, "[stdout]");
        assert_eq!(rows[3].kind, "serial");
        assert_eq!(rows[3].pool_key.as_deref(), Some("serial:/dev/ttyS0"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn bad_baud_rate_is_a_configuration_error() {
        let mut resolver = Resolver::with_config(
            MemOpener,
            ResolverConfig {
                serial_prefix: "/dev/tty".to_string(),
            },
        );
        let mut pool = ChannelPool::new();
        let err = resolve_all(
            &mut resolver,
            &mut pool,
            &["/dev/ttyS0:fast".to_string()],
            Direction::Input,
            false,
        )
        .unwrap_err();
        assert_eq!(err.code, crate::exit::CONFIG);
    }
}
