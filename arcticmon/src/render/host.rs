//! Host resources: CPU, memory, swap, GPU and disks.

use crate::types::{Gpu, Host};
use crate::ui::util::{fill, human, percent, sanitize};
use crate::view::{GpuView, HostView, Meter, Panel, View};

pub fn render_host(view: &mut View, host: Option<&Host>) {
    let Some(h) = host else {
        view.host = Panel::Empty("No host data");
        return;
    };

    let cpu = Meter {
        label: "AVG".into(),
        fill: fill(h.cpu_percent),
        value: format!("{:.0}%", h.cpu_percent),
    };
    let cores = h
        .cpu_cores
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|c| Meter {
            label: c.id.to_string(),
            fill: fill(c.percent),
            value: format!("{:.0}%", c.percent),
        })
        .collect();

    let memory = Meter {
        label: "RAM".into(),
        fill: fill(h.mem_percent),
        value: format!(
            "{} ({}/{})",
            percent(h.mem_percent),
            human(h.mem_used),
            human(h.mem_total)
        ),
    };

    let swap = Meter {
        label: "Swap".into(),
        fill: fill(h.swap_percent),
        value: if h.swap_total > 0 {
            format!(
                "{} ({}/{})",
                percent(h.swap_percent),
                human(h.swap_used),
                human(h.swap_total)
            )
        } else {
            "None".into()
        },
    };

    let disks = h
        .disks
        .iter()
        .map(|d| Meter {
            label: sanitize(&d.label),
            fill: fill(d.percent),
            value: format!(
                "{} ({}/{})",
                percent(d.percent),
                human(d.used),
                human(d.total)
            ),
        })
        .collect();

    view.host = Panel::Ready(HostView {
        cpu,
        cores,
        memory,
        swap,
        gpu: gpu_view(h.gpu.as_ref()),
        disks,
        ssh_sessions: format!("SSH: {}", h.ssh_sessions),
        uptime: if h.uptime.is_empty() {
            "--".into()
        } else {
            sanitize(&h.uptime)
        },
    });
}

fn gpu_view(gpu: Option<&Gpu>) -> GpuView {
    match gpu {
        Some(g) if g.available => GpuView {
            fill: fill(g.util_percent as f64),
            value: format!("{}%", g.util_percent),
            info: format!("GPU: {}", sanitize(&g.name)),
            temp: format!("GPU Temp: {}\u{00B0}C", g.temp_c),
            mem: format!("VRAM: {}/{}", human(g.mem_used), human(g.mem_total)),
        },
        _ => GpuView {
            fill: 0.0,
            value: "N/A".into(),
            info: "GPU: unavailable".into(),
            temp: String::new(),
            mem: String::new(),
        },
    }
}
