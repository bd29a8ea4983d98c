//! Player commands. Each one spends the full charge meter.

use super::*;
use crate::combat::{PLAYER_HEAL_AMOUNT, cut_attack_raw, resolve_heal, resolve_hit};
use crate::combatant::DamageReport;

impl<S: PresentationSink, R: RandomSource> Encounter<S, R> {
    pub fn player_id(&self) -> Option<CombatantId> {
        self.player.map(|player| player.id)
    }

    pub fn player_charge(&self) -> Option<f32> {
        self.player.map(|player| player.charge)
    }

    pub fn player_target(&self) -> Option<CombatantId> {
        self.player.and_then(|player| player.target)
    }

    pub fn is_player_charged(&self) -> bool {
        self.player.is_some_and(|player| player.charge >= PLAYER_CHARGE_LIMIT)
    }

    pub fn select_target(&mut self, id: CombatantId) -> Result<(), EncounterError> {
        let player = self.player.as_mut().ok_or(EncounterError::NoPlayer)?;
        if !self.roster.contains(id) {
            return Err(EncounterError::UnknownCombatant(id));
        }
        player.target = Some(id);
        Ok(())
    }

    pub fn player_basic_attack(&mut self) -> Result<DamageReport, EncounterError> {
        let (player, target) = self.ready_to_strike()?;
        let raw = self.combatants[player].attack();
        self.strike(target, raw)
    }

    /// Raw damage scales with the target's own max hp and cancels its defense.
    pub fn player_cut_attack(&mut self) -> Result<DamageReport, EncounterError> {
        let (_, target) = self.ready_to_strike()?;
        let raw = cut_attack_raw(&self.combatants[target]);
        self.strike(target, raw)
    }

    pub fn player_heal(&mut self) -> Result<f32, EncounterError> {
        let id = self.ready_player()?;
        self.spend_charge();
        let restored = resolve_heal(&mut self.combatants, &mut self.sink, id, PLAYER_HEAL_AMOUNT)
            .ok_or(EncounterError::PlayerDead)?;
        self.sink.on_symbolic_cue(&self.combatants[id], Cue::HealSelf);
        Ok(restored)
    }

    /// Debug command: hp to max, meter emptied.
    pub fn full_heal(&mut self) -> Result<(), EncounterError> {
        let id = self.living_player()?;
        self.combatants[id].restore_full();
        self.sink.on_vitals_changed(&self.combatants[id]);
        self.spend_charge();
        Ok(())
    }

    /// Debug command: meter to its limit.
    pub fn full_charge(&mut self) -> Result<(), EncounterError> {
        self.living_player()?;
        if let Some(player) = self.player.as_mut() {
            player.charge = PLAYER_CHARGE_LIMIT;
        }
        Ok(())
    }

    pub(super) fn recharge_player(&mut self, delta: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if let Some(speed) = self.combatants.get(player.id).map(Combatant::speed) {
            player.charge = (player.charge + speed * delta).min(PLAYER_CHARGE_LIMIT);
        }
    }

    fn living_player(&self) -> Result<CombatantId, EncounterError> {
        let player = self.player.ok_or(EncounterError::NoPlayer)?;
        if !self.player_alive(player.id) {
            return Err(EncounterError::PlayerDead);
        }
        Ok(player.id)
    }

    fn ready_player(&self) -> Result<CombatantId, EncounterError> {
        let id = self.living_player()?;
        let charge = self.player_charge().unwrap_or_default();
        if charge < PLAYER_CHARGE_LIMIT {
            return Err(EncounterError::NotCharged { charge, limit: PLAYER_CHARGE_LIMIT });
        }
        Ok(id)
    }

    fn ready_to_strike(&self) -> Result<(CombatantId, CombatantId), EncounterError> {
        let id = self.ready_player()?;
        let target = self.player_target().ok_or(EncounterError::NoTarget)?;
        if !self.roster.contains(target) {
            return Err(EncounterError::UnknownCombatant(target));
        }
        Ok((id, target))
    }

    fn spend_charge(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.charge = 0.0;
        }
    }

    fn strike(&mut self, target: CombatantId, raw: f32) -> Result<DamageReport, EncounterError> {
        self.spend_charge();
        let report = resolve_hit(&mut self.combatants, &mut self.sink, target, raw)
            .ok_or(EncounterError::UnknownCombatant(target))?;
        if let Some(id) = self.player_id() {
            self.sink.on_symbolic_cue(&self.combatants[id], Cue::Attack);
        }
        self.reap();
        self.update_outcome();
        Ok(report)
    }
}
