use crate::{
    ChoreographyDescriptor, ContentLayer, Direction, EngineOptions, LayerChoreography, Position,
    Role, Section, Step, Target, Timeline, TimelineBuilder, Transform,
};

/// Everything needed to lay out the timeline of one transition.
///
/// The resulting timeline, relative to its origin:
/// - outgoing overlay darkens, content layers exit, background drifts away, section slides out
///   (all at 0);
/// - incoming section and background slide in at `incoming_delay_ms`;
/// - incoming overlay clears at `overlay_delay_ms`;
/// - incoming content layers enter from `content_delay_ms`, staggered per element.
///
/// Parts a section does not have (background, overlay, layers, elements) are skipped.
#[derive(Clone, Copy, Debug)]
pub struct TransitionPlan<'a> {
    pub outgoing: &'a Section,
    pub incoming: &'a Section,
    pub direction: Direction,
    pub options: &'a EngineOptions,
    /// Recipe of the outgoing section.
    pub exit: &'a ChoreographyDescriptor,
    /// Recipe of the incoming section.
    pub enter: &'a ChoreographyDescriptor,
}

impl TransitionPlan<'_> {
    pub fn build(&self, origin_ms: u64) -> Timeline {
        let mut b = TimelineBuilder::new();
        self.outgoing_steps(&mut b);
        self.incoming_steps(&mut b);
        ftrace!(
            from = self.outgoing.index(),
            to = self.incoming.index(),
            tracks = b.len(),
            "TransitionPlan::build"
        );
        b.build(origin_ms)
    }

    fn outgoing_steps(&self, b: &mut TimelineBuilder) {
        let o = self.options;
        let height = o.viewport.height;
        let sign = self.direction.sign();
        let layers = self.outgoing.layers();

        if layers.overlay {
            b.add(
                Target::Overlay(Role::Outgoing),
                Step::new(
                    Transform::IDENTITY.with_opacity(0.0),
                    Transform::IDENTITY.with_opacity(o.outgoing_overlay_opacity),
                    o.main_duration_ms / 2,
                    o.main_easing,
                ),
                Position::At(0),
            );
        }

        self.skip_missing_layers(self.outgoing, self.exit);
        for layer in &layers.content {
            self.layer_steps(b, Role::Outgoing, layer, 0);
        }

        if layers.background {
            b.add(
                Target::Background(Role::Outgoing),
                Step::new(
                    Transform::IDENTITY,
                    Transform::translate_y(-sign * o.parallax_ratio * height)
                        .with_scale(o.background_scale),
                    o.background_duration_ms,
                    o.background_easing,
                ),
                Position::At(0),
            );
        }

        b.add(
            Target::Section(Role::Outgoing),
            Step::new(
                Transform::IDENTITY,
                Transform::translate_y(-sign * height),
                o.main_duration_ms,
                o.main_easing,
            ),
            Position::At(0),
        );
    }

    fn incoming_steps(&self, b: &mut TimelineBuilder) {
        let o = self.options;
        let height = o.viewport.height;
        let sign = self.direction.sign();
        let layers = self.incoming.layers();

        b.add(
            Target::Section(Role::Incoming),
            Step::new(
                Transform::translate_y(sign * height),
                Transform::IDENTITY,
                o.main_duration_ms,
                o.incoming_easing,
            ),
            Position::At(o.incoming_delay_ms),
        );

        if layers.background {
            b.add(
                Target::Background(Role::Incoming),
                Step::new(
                    Transform::translate_y(sign * o.parallax_ratio * height)
                        .with_scale(o.background_scale),
                    Transform::IDENTITY,
                    o.background_duration_ms,
                    o.background_easing,
                ),
                Position::WithPrevious,
            );
        }

        if layers.overlay {
            b.add(
                Target::Overlay(Role::Incoming),
                Step::new(
                    Transform::IDENTITY.with_opacity(o.incoming_overlay_opacity),
                    Transform::IDENTITY.with_opacity(0.0),
                    o.main_duration_ms.saturating_mul(4) / 5,
                    o.main_easing,
                ),
                Position::At(o.overlay_delay_ms),
            );
        }

        self.skip_missing_layers(self.incoming, self.enter);
        for layer in &layers.content {
            self.layer_steps(b, Role::Incoming, layer, o.content_delay_ms);
        }
    }

    fn recipe(&self, role: Role, layer: &str) -> LayerChoreography {
        let descriptor = match role {
            Role::Outgoing => self.exit,
            Role::Incoming => self.enter,
        };
        descriptor.layer(layer).copied().unwrap_or_else(|| {
            LayerChoreography::directional(
                self.options.content_shift,
                self.direction.sign(),
                self.options.fallback_enter_timing(),
                self.options.fallback_exit_timing(),
            )
        })
    }

    fn layer_steps(&self, b: &mut TimelineBuilder, role: Role, layer: &ContentLayer, base_ms: u64) {
        if layer.elements == 0 {
            ftrace!(layer = layer.name.as_str(), "layer has no elements, skipping");
            return;
        }
        let recipe = self.recipe(role, &layer.name);
        let (timing, step) = match role {
            Role::Outgoing => (
                recipe.exit,
                Step::new(
                    Transform::IDENTITY,
                    recipe.exit_to,
                    recipe.exit.duration_ms,
                    recipe.exit.easing,
                ),
            ),
            Role::Incoming => (
                recipe.enter,
                Step::new(
                    recipe.enter_from,
                    Transform::IDENTITY,
                    recipe.enter.duration_ms,
                    recipe.enter.easing,
                ),
            ),
        };
        let targets = (0..layer.elements).map(|e| Target::element(role, layer.name.as_str(), e));
        b.stagger(
            targets,
            step,
            timing.stagger_ms,
            Position::At(base_ms.saturating_add(timing.start_ms)),
        );
    }

    fn skip_missing_layers(&self, section: &Section, descriptor: &ChoreographyDescriptor) {
        for (name, _) in descriptor.layers() {
            if section.layers().content_layer(name).is_none() {
                ftrace!(
                    section = section.id(),
                    layer = name,
                    "choreographed layer missing from section, skipping"
                );
            }
        }
    }
}
